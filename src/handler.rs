//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{DOCTORED_PREFIX, RECOVERED_PREFIX};
use crate::error::StegoError;
use crate::payload::{build_payload, to_binary_string};
use crate::pixels::PixelBuffer;
use crate::steganography::{Utf8Mode, bytes_to_text, decode, encode, max_message_len};
use anyhow::{Context, Result};
use colored::Colorize;
use image::ImageFormat;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 可以安全保存隐写结果的无损格式。
const LOSSLESS_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Qoi,
];

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和消息、调用编码器把载荷写入 RGB 最低位，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 目标文件已存在且未指定 `--force`，或目标格式不是无损格式。
/// * 图像没有足够的空间来隐藏消息。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_path(&args.image, DOCTORED_PREFIX, "png"));

    ensure_writable(&dest, args.force)?;
    ensure_lossless(&dest)?;
    if let Some(nulled) = &args.nulled {
        ensure_writable(nulled, args.force)?;
        ensure_lossless(nulled)?;
    }

    let carrier = load_pixels(&args.image)?;
    let message = read_message(&args)?;

    let stego = encode(&carrier, &message).map_err(describe_encode_error)?;
    info!(
        "embedded {} bytes into {}x{} image",
        message.len(),
        stego.width(),
        stego.height()
    );

    if args.show_bits {
        let payload = build_payload(&message)?;
        println!("{}", to_binary_string(&payload));
    }

    if let Some(nulled) = &args.nulled {
        save_pixels(carrier.cleared_lsbs(), nulled)?;
        debug!("saved LSB-cleared preview to {}", nulled.display());
    }

    save_pixels(stego, &dest)?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用解码器恢复消息，
/// 最后将恢复的原始字节写入目标文件。指定 `--strict` 时，
/// 只有合法的 UTF-8 文本才会被写出。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像中没有合法的隐藏消息，或严格模式下消息不是合法 UTF-8。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let text_path = args
        .text
        .clone()
        .unwrap_or_else(|| default_path(&args.image, RECOVERED_PREFIX, "txt"));

    ensure_writable(&text_path, args.force)?;

    let stego = load_pixels(&args.image)?;

    let mut message = decode(&stego).with_context(|| {
        format!(
            "Failed to recover the message from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    info!("recovered {} bytes", message.len());

    if args.strict {
        message = bytes_to_text(message, Utf8Mode::Strict)
            .context("The recovered message is not valid UTF-8 text.")?
            .into_bytes();
    }

    fs::write(&text_path, message).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        text_path.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令：打印图像的比特容量和可容纳的最大消息字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let pixels = load_pixels(&args.image)?;

    println!(
        "{}x{} image: {} bits available, up to {} message bytes",
        pixels.width(),
        pixels.height(),
        pixels.capacity_bits().to_string().green().bold(),
        max_message_len(&pixels).to_string().green().bold()
    );
    Ok(())
}

/// 为编码错误加上面向用户的说明，容量不足时附带所需和可用的比特数。
fn describe_encode_error(err: StegoError) -> anyhow::Error {
    let detail = match &err {
        StegoError::CapacityExceeded {
            required_bits,
            available_bits,
        } => format!(
            "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
            required_bits.to_string().red().bold(),
            available_bits.to_string().green().bold()
        ),
        _ => "Unable to hide the text in the image.".to_owned(),
    };
    anyhow::Error::new(err).context(detail)
}

/// 在输入图像所在目录下生成 `<前缀><文件名>.<扩展名>` 形式的默认路径。
fn default_path(image: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    image.with_file_name(format!("{prefix}{stem}.{extension}"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn ensure_lossless(path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Unable to determine image format from: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        LOSSLESS_FORMATS.contains(&format),
        "Output format {:?} is not lossless and would destroy the hidden message: {}",
        format,
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn read_message(args: &HideArgs) -> Result<Vec<u8>> {
    match (&args.message, &args.text) {
        (Some(message), _) => Ok(message.as_bytes().to_vec()),
        (None, Some(path)) => fs::read(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        }),
        (None, None) => anyhow::bail!("Either --text or --message must be provided."),
    }
}

fn load_pixels(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    debug!("loaded {} as {:?}", path.display(), img.color());
    PixelBuffer::try_from(img.to_rgba8()).with_context(|| {
        format!(
            "Image has no usable pixels: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn save_pixels(pixels: PixelBuffer, path: &Path) -> Result<()> {
    pixels.into_rgba_image().save(path).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}
