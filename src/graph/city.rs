//! 城市定义
//!
//! 城市 ID 是排序去重后名称列表中的下标，稠密且从 0 开始

use crate::error::{Error, Result};
use crate::geo::{Coordinate, CoordinateLookup};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 城市 ID（区间 [0, N) 内的稠密整数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityId(pub usize);

impl CityId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl From<usize> for CityId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 城市（ID + 显示名称 + 坐标）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub coordinate: Coordinate,
}

/// 名称与 ID 的双向映射
#[derive(Debug, Clone, Default)]
pub struct CityIndex {
    names: IndexSet<String>,
}

impl CityIndex {
    /// 从名称序列创建索引：去除首尾空白、排序、去重
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .collect();
        sorted.sort();
        sorted.dedup();

        Self {
            names: sorted.into_iter().collect(),
        }
    }

    /// 城市数
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 按名称查找 ID（区分大小写，精确匹配）
    pub fn lookup(&self, name: &str) -> Option<CityId> {
        self.names.get_index_of(name.trim()).map(CityId::new)
    }

    /// 按名称查找 ID，找不到视为调用方错误
    pub fn id_of(&self, name: &str) -> Result<CityId> {
        self.lookup(name)
            .ok_or_else(|| Error::CityNotFound(name.trim().to_string()))
    }

    /// 按 ID 获取名称
    pub fn name_of(&self, id: CityId) -> Option<&str> {
        self.names.get_index(id.as_usize()).map(String::as_str)
    }

    /// 按 ID 顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (CityId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (CityId::new(i), name.as_str()))
    }

    /// 按 ID 顺序排列的所有名称
    pub fn names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    /// 结合坐标查询组装完整的城市列表
    pub fn cities(&self, lookup: &dyn CoordinateLookup) -> Vec<City> {
        self.iter()
            .map(|(id, name)| City {
                id,
                name: name.to_string(),
                coordinate: lookup.coordinate_or_default(name),
            })
            .collect()
    }
}
