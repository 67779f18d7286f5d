//! 演示入口
//!
//! 构建事实、加载规则文件，依次运行三个表达式后端通道并报告耗时。

use anyhow::Context;
use clap::Parser;
use shop_demo::cli::Cli;
use shop_demo::facts::build_facts;
use shop_demo::lane::{lanes, print_facts, run_lane};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化 tracing 日志，环境变量 RUST_LOG 优先于命令行参数
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .init();

    for lane in lanes() {
        println!("---------- {} ----------", lane.label);

        let mut facts = build_facts()?;
        let rule_file = lane.rule_file(cli.rule_file.as_deref());

        print_facts(&facts, "before");
        let elapsed = run_lane(&lane, &rule_file, &mut facts, cli.iterations, cli.warmup)
            .with_context(|| format!("通道 {} 运行失败", lane.label))?;
        print_facts(&facts, "after");

        println!(
            "Elapsed time ({}): {:.2} ns/op",
            lane.label,
            elapsed.as_nanos() as f64 / cli.iterations.max(1) as f64
        );
    }

    Ok(())
}
