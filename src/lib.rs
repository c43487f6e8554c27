//! # lsb_canvas 库
//!
//! 本库包含 RGB LSB 隐写编解码器的核心逻辑，以及包装它的命令行处理层。
//! 编解码器只处理已解码的 RGBA 像素缓冲区，不关心图像文件格式。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod payload;
pub mod pixels;
pub mod steganography;

pub use error::StegoError;
pub use pixels::PixelBuffer;
pub use steganography::{Utf8Mode, bytes_to_text, decode, decode_text, encode, encode_text};
