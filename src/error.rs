//! # 错误类型模块
//!
//! 定义隐写编解码过程中所有可能出现的错误。
//! 每个错误都携带足够的数值上下文 (所需比特数、可用比特数、声明长度等)，
//! 以便上层给出精确的诊断信息。

use thiserror::Error;

/// 隐写编码或解码时可能发生的错误。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StegoError {
    /// 载荷比特数超过了载体图像的容量。
    #[error("payload needs {required_bits} bits but the image only has {available_bits}")]
    CapacityExceeded {
        required_bits: u64,
        available_bits: u64,
    },

    /// 图像连 32 位长度头部都放不下。
    #[error("image holds {available_bits} bits, too small to contain a 32-bit length header")]
    BufferTooSmall { available_bits: u64 },

    /// 头部声明的长度超出了图像容量，通常说明图像中没有隐藏消息或已损坏。
    #[error(
        "declared length of {declared_len} bytes exceeds image capacity of {available_bits} bits"
    )]
    DeclaredLengthExceedsCapacity {
        declared_len: u32,
        available_bits: u64,
    },

    /// 严格模式下，提取出的字节不是合法的 UTF-8。
    #[error("recovered bytes are not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidEncoding { valid_up_to: usize },

    /// 消息长度无法用 32 位长度头部表示。
    #[error("message of {len} bytes exceeds the 32-bit length header limit")]
    MessageTooLong { len: usize },

    #[error("image dimensions {width}x{height} must both be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// 像素数据长度与 `width * height * 4` 不一致。
    #[error("pixel buffer holds {actual} samples, expected {expected}")]
    BufferLengthMismatch { expected: usize, actual: usize },
}
