//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

/// 一款基于 RGB 通道 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像中隐藏或恢复消息。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 RGB 通道 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复消息。\n结果图像必须以无损格式保存，有损压缩会破坏隐藏的数据。"
)]
pub struct Cli {
    /// 输出更详细的日志 (-v 为 info, -vv 为 debug, -vvv 为 trace)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏一段消息。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的消息。
    Recover(RecoverArgs),

    /// 显示图像能够容纳的最大消息长度。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["text", "message"])))]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的消息所在的文件路径 (按原始字节读取)。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 直接在命令行上给出的消息文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 结果图像的输出路径，默认为输入图像同目录下的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 额外保存一张 RGB 最低位全部清零的对比图。
    #[arg(long)]
    pub nulled: Option<PathBuf>,

    /// 以二进制形式打印嵌入的载荷。
    #[arg(long)]
    pub show_bits: bool,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏消息的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复消息后的保存路径，默认为图像同目录下的 `recovered_<名称>.txt`。
    /// 消息按原始字节写出。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 要求恢复的消息是合法的 UTF-8 文本，否则报错且不写出文件。
    #[arg(long)]
    pub strict: bool,

    /// 允许覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
