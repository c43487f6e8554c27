//! # 像素缓冲区模块
//!
//! `PixelBuffer` 是编解码器与外部图像加载/保存逻辑之间的边界类型。
//! 像素按行优先存储，每个像素固定 4 个 8 位采样 (R, G, B, A)。

use crate::constants::{DATA_CHANNELS, SAMPLES_PER_PIXEL};
use crate::error::StegoError;
use image::RgbaImage;

/// 行优先、RGBA8 布局的像素缓冲区。
///
/// 构造后 `samples.len() == width * height * 4` 始终成立。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// 用给定的尺寸和原始采样创建像素缓冲区。
    ///
    /// # Errors
    ///
    /// * 宽或高为 0 时返回 [`StegoError::InvalidDimensions`]。
    /// * 采样数与 `width * height * 4` 不一致时返回 [`StegoError::BufferLengthMismatch`]。
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, StegoError> {
        if width == 0 || height == 0 {
            return Err(StegoError::InvalidDimensions { width, height });
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(SAMPLES_PER_PIXEL))
            .unwrap_or(usize::MAX);

        if samples.len() != expected {
            return Err(StegoError::BufferLengthMismatch {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// 可用于隐写的比特总数：`width * height * 3`。
    ///
    /// 每次调用都重新计算，不做缓存。
    pub fn capacity_bits(&self) -> u64 {
        self.pixel_count().saturating_mul(DATA_CHANNELS)
    }

    /// 返回一个 R、G、B 通道最低位全部清零的副本，Alpha 保持不变。
    ///
    /// 仅用于预览对比，编码过程本身不会清除载荷范围之外的像素。
    pub fn cleared_lsbs(&self) -> Self {
        let mut cleared = self.clone();
        cleared
            .samples
            .chunks_exact_mut(SAMPLES_PER_PIXEL)
            .for_each(|pixel| {
                pixel[..DATA_CHANNELS as usize]
                    .iter_mut()
                    .for_each(|sample| *sample &= 0xFE);
            });
        cleared
    }

    /// 转换回 `image` crate 的 RGBA 图像，供保存使用。
    pub fn into_rgba_image(self) -> RgbaImage {
        // 长度不变式在构造时已经保证
        RgbaImage::from_raw(self.width, self.height, self.samples)
            .unwrap_or_else(|| unreachable!("pixel buffer length invariant violated"))
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = StegoError;

    /// 与 [`PixelBuffer::new`] 做相同的校验，空图像会被拒绝。
    fn try_from(img: RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }
}
