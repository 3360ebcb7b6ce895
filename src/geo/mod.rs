//! 坐标查询模块
//!
//! 坐标查询作为显式依赖在调用时传入，不使用全局状态

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 地理坐标（纬度, 经度）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `[lat, lon]`，Leaflet 使用的顺序
    pub fn to_pair(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

/// 坐标查询能力
pub trait CoordinateLookup {
    /// 按城市名查询坐标
    fn coordinate(&self, city: &str) -> Option<Coordinate>;

    /// 查询不到时返回 (0, 0)
    fn coordinate_or_default(&self, city: &str) -> Coordinate {
        self.coordinate(city).unwrap_or_default()
    }
}

/// 内存坐标表
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    entries: HashMap<String, Coordinate>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入坐标，名称去除首尾空白；返回旧值
    pub fn insert(&mut self, city: &str, coordinate: Coordinate) -> Option<Coordinate> {
        self.entries.insert(city.trim().to_string(), coordinate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CoordinateLookup for CoordinateTable {
    fn coordinate(&self, city: &str) -> Option<Coordinate> {
        self.entries.get(city.trim()).copied()
    }
}

impl FromIterator<(String, Coordinate)> for CoordinateTable {
    fn from_iter<T: IntoIterator<Item = (String, Coordinate)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (city, coordinate) in iter {
            table.insert(&city, coordinate);
        }
        table
    }
}
