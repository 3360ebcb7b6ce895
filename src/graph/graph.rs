//! 城市图数据结构
//!
//! 有向带权邻接表：城市 ID -> (邻居 ID -> 距离)

use super::city::CityId;
use indexmap::IndexMap;

/// 城市图
///
/// 构建完成后只读，可通过 `Arc` 在多次查询间共享。
/// 边权必须非负，这是最短路径算法的前提，这里不做校验。
#[derive(Debug, Clone, Default)]
pub struct CityGraph {
    adjacency: Vec<IndexMap<CityId, f64>>,
}

impl CityGraph {
    /// 创建包含 `city_count` 个孤立城市的图
    pub fn with_cities(city_count: usize) -> Self {
        Self {
            adjacency: vec![IndexMap::new(); city_count],
        }
    }

    /// 设置有向边，已存在时覆盖并返回旧权重
    pub(crate) fn set_edge(&mut self, from: CityId, to: CityId, distance: f64) -> Option<f64> {
        self.adjacency[from.as_usize()].insert(to, distance)
    }

    /// 删除有向边
    pub fn remove_edge(&mut self, from: CityId, to: CityId) -> Option<f64> {
        self.adjacency
            .get_mut(from.as_usize())
            .and_then(|edges| edges.shift_remove(&to))
    }

    /// 城市数
    pub fn city_count(&self) -> usize {
        self.adjacency.len()
    }

    /// 边数
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(IndexMap::len).sum()
    }

    /// ID 是否在图中
    pub fn contains(&self, id: CityId) -> bool {
        id.as_usize() < self.adjacency.len()
    }

    /// 出边邻居及权重
    pub fn neighbors(&self, id: CityId) -> impl Iterator<Item = (CityId, f64)> + '_ {
        self.adjacency
            .get(id.as_usize())
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(&to, &w)| (to, w)))
    }

    /// 出度
    pub fn out_degree(&self, id: CityId) -> usize {
        self.adjacency
            .get(id.as_usize())
            .map(IndexMap::len)
            .unwrap_or(0)
    }

    /// 边权重
    pub fn weight(&self, from: CityId, to: CityId) -> Option<f64> {
        self.adjacency
            .get(from.as_usize())
            .and_then(|edges| edges.get(&to).copied())
    }

    /// 遍历所有边 (from, to, weight)
    pub fn edges(&self) -> impl Iterator<Item = (CityId, CityId, f64)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(from, edges)| {
            edges
                .iter()
                .map(move |(&to, &w)| (CityId::new(from), to, w))
        })
    }
}
