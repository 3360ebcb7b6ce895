//! CityPath CLI 工具
//!
//! 交互式最短路径查询

use anyhow::Context;
use citypath::cli::{CityCompleter, Printer, Shell, ShellConfig};
use citypath::graph::GraphBuilder;
use citypath::import::{load_coordinates, load_distance_records};
use citypath::render::MapRenderer;
use citypath::types::DistanceUnit;
use citypath::CoordinateTable;
use clap::Parser;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "citypath-cli")]
#[command(about = "城市最短驾驶距离查询工具")]
struct Args {
    /// 距离表 CSV（列: start,end,distance）
    #[arg(short, long, default_value = "distance_data.csv")]
    distances: PathBuf,

    /// 城市坐标表 CSV（列: city,lat,lon）
    #[arg(short, long)]
    cities: Option<PathBuf>,

    /// 距离表单位: miles, meters
    #[arg(short, long, default_value = "miles")]
    unit: DistanceUnit,

    /// 地图输出路径（默认保存到桌面）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 不生成地图
    #[arg(long)]
    no_map: bool,

    /// 起点城市（与 --to 一起使用时只查询一次）
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// 终点城市
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let records = load_distance_records(&args.distances, args.unit)
        .with_context(|| format!("读取距离表失败: {}", args.distances.display()))?;
    let built = GraphBuilder::new().build(&records)?;
    if built.stats.overwritten > 0 {
        warn!(count = built.stats.overwritten, "距离表中存在重复边，已按最后一条覆盖");
    }

    let coordinates = match &args.cities {
        Some(path) => load_coordinates(path)
            .with_context(|| format!("读取坐标表失败: {}", path.display()))?,
        None => {
            info!("未提供坐标表，所有城市坐标默认为 (0, 0)");
            CoordinateTable::new()
        }
    };

    let config = ShellConfig {
        render_map: !args.no_map,
        map_output: args
            .output
            .clone()
            .unwrap_or_else(MapRenderer::default_output_path),
        renderer: MapRenderer::default(),
    };
    let shell = Shell::new(&built.index, built.graph.clone(), &coordinates, config);
    let mut stdout = io::stdout();

    // 单次查询模式
    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        shell.answer_by_name(from, to, &mut stdout)?;
        return Ok(());
    }

    // 交互模式
    println!("Cities: {}", built.index.names().join(", "));
    print!(
        "{}",
        Printer::new().format_stats(built.graph.city_count(), built.graph.edge_count())
    );

    let mut editor: Editor<CityCompleter, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CityCompleter::new(&built.index)));

    let end = shell.run(&mut editor, &mut stdout)?;
    info!(?end, "会话结束");

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
