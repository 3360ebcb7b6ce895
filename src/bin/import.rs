//! CityPath 数据清洗工具
//!
//! 将距离采集脚本的原始输出（米，含多余列）转换为 start,end,distance（英里）

use anyhow::Context;
use citypath::import::clean_raw_distances;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "citypath-import")]
#[command(about = "CityPath 距离表清洗工具")]
struct Args {
    /// 原始距离表 CSV（列: origin,destination,distance(m),start,end）
    #[arg(short, long)]
    input: PathBuf,

    /// 输出路径
    #[arg(short, long, default_value = "distance_data.csv")]
    output: PathBuf,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    println!("CityPath 距离表清洗工具");
    println!("========================");
    println!("输入文件: {:?}", args.input);
    println!("输出文件: {:?}", args.output);

    let stats = clean_raw_distances(&args.input, &args.output)
        .with_context(|| format!("清洗失败: {}", args.input.display()))?;

    println!("\n清洗完成!");
    println!("  读取行数: {}", stats.rows_read);
    println!("  写出行数: {}", stats.rows_accepted);
    println!("  耗时: {} ms", stats.duration_ms);

    Ok(())
}
