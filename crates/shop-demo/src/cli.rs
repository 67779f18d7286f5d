//! 命令行定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use clap::Parser;
use std::path::PathBuf;

/// 规则引擎表达式后端演示与基准工具
///
/// 依次运行 rhai / tera / evalexpr 三个表达式后端通道，打印触发前后
/// 的事实状态与每次触发的平均耗时。
#[derive(Parser, Debug)]
#[command(name = "shop-demo")]
#[command(version, about = "规则引擎表达式后端演示与基准")]
pub struct Cli {
    /// 规则定义文件路径，覆盖所有通道的默认文件
    ///
    /// 文件中的表达式语法必须与各通道匹配，跨通道复用同一个文件
    /// 通常会在其余通道触发编译错误并终止运行。
    pub rule_file: Option<PathBuf>,

    /// 计时循环的触发次数
    #[arg(long, default_value_t = 100_000)]
    pub iterations: u64,

    /// 预热触发次数（不计时）
    #[arg(long, default_value_t = 10_000)]
    pub warmup: u64,

    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}
