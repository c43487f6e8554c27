/// 长度头部占用的字节数。
/// 消息长度以大端 `u32` 存储在载荷最前面。
pub const HEADER_BYTES: usize = 4;

/// 长度头部占用的比特数 (4 字节 * 8)。
pub const HEADER_BITS: u64 = 32;

/// 每个字节的比特数。
pub const BITS_PER_BYTE: u64 = 8;

/// 每个像素的采样数 (R, G, B, A)。
pub const SAMPLES_PER_PIXEL: usize = 4;

/// 每个像素中可用于隐写的通道数。
/// 只使用 R、G、B 三个通道，Alpha 通道永远不会被修改。
pub const DATA_CHANNELS: u64 = 3;

/// 未指定输出路径时，隐写结果图像的默认文件名前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本的默认文件名前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
