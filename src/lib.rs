//! CityPath - 城市间最短驾驶距离查询
//!
//! 基于城市间距离表构建有向带权图，支持：
//! - 从 CSV 距离表构建城市图
//! - Dijkstra 单源最短路径与路径重构
//! - 交互式命令行查询
//! - 生成带城市标记和路径折线的 HTML 地图

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod geo;
pub mod graph;
pub mod import;
pub mod render;
pub mod types;

// 重导出常用类型
pub use algorithm::{shortest_distances, shortest_path, PathFinder, PathResult, ShortestPaths};
pub use error::{Error, Result};
pub use geo::{Coordinate, CoordinateLookup, CoordinateTable};
pub use graph::{City, CityGraph, CityId, CityIndex, DistanceRecord, GraphBuilder};
pub use types::{DistanceUnit, METERS_TO_MILES};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
