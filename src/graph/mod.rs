//! 城市图核心模块
//!
//! 定义城市索引、邻接表和图构建器

mod builder;
mod city;
mod graph;

pub use builder::{BuildStats, BuiltGraph, DistanceRecord, GraphBuilder};
pub use city::{City, CityId, CityIndex};
pub use graph::CityGraph;
