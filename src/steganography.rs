//! # 隐写核心算法模块
//!
//! 载荷按高位在前展开成比特流，第 `i` 位写入像素 `i / 3` 的第 `i % 3` 个通道
//! (0 = R, 1 = G, 2 = B) 的最低有效位。编码和解码共用 [`locate`] 与
//! [`sample_offset`]，保证两端的比特顺序完全一致。
//!
//! 结果图像必须以无损格式保存，任何有损压缩都会破坏隐藏的数据。

use crate::constants::{BITS_PER_BYTE, DATA_CHANNELS, HEADER_BITS, SAMPLES_PER_PIXEL};
use crate::error::StegoError;
use crate::payload::{build_payload, payload_bits};
use crate::pixels::PixelBuffer;
use log::debug;

/// 承载数据的颜色通道。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    /// 第 `bit_index` 位所在的通道，按 R、G、B 循环。
    fn for_bit(bit_index: u64) -> Self {
        match bit_index % DATA_CHANNELS {
            0 => Channel::Red,
            1 => Channel::Green,
            _ => Channel::Blue,
        }
    }
}

/// 提取出的字节如何解释为文本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Mode {
    /// 非法序列替换为 U+FFFD。
    #[default]
    Lossy,
    /// 非法序列返回 [`StegoError::InvalidEncoding`]。
    Strict,
}

/// 把全局比特索引映射为 `(像素索引, 通道)`。
pub fn locate(bit_index: u64) -> (u64, Channel) {
    (
        bit_index / DATA_CHANNELS,
        Channel::for_bit(bit_index),
    )
}

/// 像素索引和通道在扁平采样数组中的偏移量。
pub fn sample_offset(pixel_index: u64, channel: Channel) -> usize {
    pixel_index as usize * SAMPLES_PER_PIXEL + channel as usize
}

fn bit_offset(bit_index: u64) -> usize {
    let (pixel_index, channel) = locate(bit_index);
    sample_offset(pixel_index, channel)
}

fn read_bit(samples: &[u8], bit_index: u64) -> u8 {
    samples[bit_offset(bit_index)] & 1
}

/// 载体最多能容纳的消息字节数。
pub fn max_message_len(buffer: &PixelBuffer) -> u64 {
    let body_bits = buffer.capacity_bits().saturating_sub(HEADER_BITS);
    (body_bits / BITS_PER_BYTE).min(u64::from(u32::MAX))
}

/// 把消息嵌入载体，返回新的像素缓冲区。
///
/// 载体本身不会被修改。只有前 `ceil(payload_bits / 3)` 个像素的 R/G/B
/// 最低位可能改变，Alpha 和其余像素与输入逐位相同。
///
/// # Errors
///
/// * 载荷比特数超过容量时返回 [`StegoError::CapacityExceeded`]，载体保持不变。
/// * 消息长度超过 `u32::MAX` 时返回 [`StegoError::MessageTooLong`]。
pub fn encode(carrier: &PixelBuffer, message: &[u8]) -> Result<PixelBuffer, StegoError> {
    let required_bits = payload_bits(message.len() as u64);
    let available_bits = carrier.capacity_bits();

    if required_bits > available_bits {
        return Err(StegoError::CapacityExceeded {
            required_bits,
            available_bits,
        });
    }

    let payload = build_payload(message)?;
    debug!(
        "embedding {} message bytes ({} of {} bits)",
        message.len(),
        required_bits,
        available_bits
    );

    let mut stego = carrier.clone();
    let samples = stego.samples_mut();

    payload
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).rev().map(move |shift| (byte >> shift) & 1))
        .zip(0u64..)
        .for_each(|(bit, bit_index)| {
            let offset = bit_offset(bit_index);
            samples[offset] = (samples[offset] & 0xFE) | bit;
        });

    Ok(stego)
}

/// 把文本的 UTF-8 字节嵌入载体。
pub fn encode_text(carrier: &PixelBuffer, text: &str) -> Result<PixelBuffer, StegoError> {
    encode(carrier, text.as_bytes())
}

/// 从隐写图像中提取消息字节。
///
/// # Errors
///
/// * 容量不足 32 位时返回 [`StegoError::BufferTooSmall`]。
/// * 头部声明的长度超出容量时返回 [`StegoError::DeclaredLengthExceedsCapacity`]，
///   此时不会读取头部之后的任何数据。
pub fn decode(stego: &PixelBuffer) -> Result<Vec<u8>, StegoError> {
    let available_bits = stego.capacity_bits();
    if available_bits < HEADER_BITS {
        return Err(StegoError::BufferTooSmall { available_bits });
    }

    let samples = stego.samples();
    let declared_len = (0..HEADER_BITS)
        .fold(0u32, |acc, bit_index| (acc << 1) | u32::from(read_bit(samples, bit_index)));

    let required_bits = payload_bits(u64::from(declared_len));
    if required_bits > available_bits {
        return Err(StegoError::DeclaredLengthExceedsCapacity {
            declared_len,
            available_bits,
        });
    }
    debug!("header declares {declared_len} bytes ({required_bits} of {available_bits} bits)");

    let message = (0..u64::from(declared_len))
        .map(|byte_index| {
            let start = HEADER_BITS + byte_index * BITS_PER_BYTE;
            (start..start + BITS_PER_BYTE)
                .fold(0u8, |acc, bit_index| (acc << 1) | read_bit(samples, bit_index))
        })
        .collect();

    Ok(message)
}

/// 提取消息并按 `mode` 解释为 UTF-8 文本。
///
/// # Errors
///
/// 除 [`decode`] 的错误外，严格模式下遇到非法 UTF-8 返回
/// [`StegoError::InvalidEncoding`]。
pub fn decode_text(stego: &PixelBuffer, mode: Utf8Mode) -> Result<String, StegoError> {
    bytes_to_text(decode(stego)?, mode)
}

/// 按 `mode` 把已提取的消息字节解释为 UTF-8 文本。
///
/// # Errors
///
/// 严格模式下遇到非法 UTF-8 返回 [`StegoError::InvalidEncoding`]。
pub fn bytes_to_text(bytes: Vec<u8>, mode: Utf8Mode) -> Result<String, StegoError> {
    match mode {
        Utf8Mode::Lossy => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Utf8Mode::Strict => String::from_utf8(bytes).map_err(|e| StegoError::InvalidEncoding {
            valid_up_to: e.utf8_error().valid_up_to(),
        }),
    }
}
