//! # 载荷封装模块
//!
//! 载荷 = 4 字节大端长度头部 + 消息字节。

use crate::constants::{BITS_PER_BYTE, HEADER_BITS, HEADER_BYTES};
use crate::error::StegoError;

/// 为消息构造载荷：大端 `u32` 长度头部，后接消息本身。
///
/// # Errors
///
/// 消息长度超过 `u32::MAX` 时返回 [`StegoError::MessageTooLong`]。
pub fn build_payload(message: &[u8]) -> Result<Vec<u8>, StegoError> {
    let len = u32::try_from(message.len())
        .map_err(|_| StegoError::MessageTooLong { len: message.len() })?;

    let mut payload = Vec::with_capacity(HEADER_BYTES + message.len());
    payload.extend_from_slice(&len.to_be_bytes());
    payload.extend_from_slice(message);
    Ok(payload)
}

/// 长度为 `message_len` 字节的消息所需的比特总数 (含头部)。
pub fn payload_bits(message_len: u64) -> u64 {
    HEADER_BITS.saturating_add(message_len.saturating_mul(BITS_PER_BYTE))
}

/// 把字节渲染成 `0`/`1` 字符串，每字节 8 位、高位在前，中间不加分隔符。
pub fn to_binary_string(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:08b}")).collect()
}
