//! 图算法模块
//!
//! 单源最短路径与路径重构

mod dijkstra;

pub use dijkstra::{shortest_distances, shortest_path, PathFinder, PathResult, ShortestPaths};
