//! 图构建器
//!
//! 将扁平的 (起点, 终点, 距离) 记录表转换为按城市 ID 索引的邻接表

use super::city::CityIndex;
use super::graph::CityGraph;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// 距离记录（一条有向边）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub start: String,
    pub end: String,
    pub distance: f64,
}

impl DistanceRecord {
    pub fn new(start: impl Into<String>, end: impl Into<String>, distance: f64) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            distance,
        }
    }
}

/// 构建统计
#[derive(Debug, Default, Clone)]
pub struct BuildStats {
    /// 输入记录数
    pub records: usize,
    /// 最终边数
    pub edges: usize,
    /// 被后续记录覆盖的重复边数
    pub overwritten: usize,
    pub duration_ms: u64,
}

/// 构建结果
#[derive(Debug, Clone)]
pub struct BuiltGraph {
    pub index: CityIndex,
    pub graph: Arc<CityGraph>,
    pub stats: BuildStats,
}

/// 图构建器
///
/// 不做单位换算；重复的 (起点, 终点) 以最后一条为准，
/// 覆盖次数记录在 [`BuildStats::overwritten`] 中。
#[derive(Debug, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 构建城市索引和图
    pub fn build(&self, records: &[DistanceRecord]) -> Result<BuiltGraph> {
        let start = std::time::Instant::now();

        let index = CityIndex::from_names(
            records
                .iter()
                .flat_map(|r| [r.start.as_str(), r.end.as_str()]),
        );

        let mut graph = CityGraph::with_cities(index.len());
        let mut stats = BuildStats {
            records: records.len(),
            ..Default::default()
        };

        for record in records {
            let from = index.id_of(&record.start)?;
            let to = index.id_of(&record.end)?;

            if let Some(previous) = graph.set_edge(from, to, record.distance) {
                stats.overwritten += 1;
                debug!(
                    start = record.start.trim(),
                    end = record.end.trim(),
                    previous,
                    current = record.distance,
                    "重复边被覆盖"
                );
            }
        }

        stats.edges = graph.edge_count();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            cities = index.len(),
            edges = stats.edges,
            overwritten = stats.overwritten,
            "城市图构建完成"
        );

        Ok(BuiltGraph {
            index,
            graph: Arc::new(graph),
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CityId;

    #[test]
    fn test_build_basic() {
        let records = vec![
            DistanceRecord::new("A", "B", 5.0),
            DistanceRecord::new("B", "C", 3.0),
            DistanceRecord::new("A", "C", 10.0),
        ];

        let built = GraphBuilder::new().build(&records).unwrap();
        assert_eq!(built.index.names(), vec!["A", "B", "C"]);
        assert_eq!(built.graph.city_count(), 3);
        assert_eq!(built.graph.edge_count(), 3);
        assert_eq!(built.graph.weight(CityId(0), CityId(1)), Some(5.0));
        assert_eq!(built.graph.weight(CityId(1), CityId(0)), None);
        assert_eq!(built.stats.records, 3);
        assert_eq!(built.stats.overwritten, 0);
    }

    #[test]
    fn test_last_write_wins() {
        let records = vec![
            DistanceRecord::new("Boston", "Worcester", 47.0),
            DistanceRecord::new("Boston ", " Worcester", 45.5),
        ];

        let built = GraphBuilder::new().build(&records).unwrap();
        assert_eq!(built.graph.edge_count(), 1);
        assert_eq!(built.graph.weight(CityId(0), CityId(1)), Some(45.5));
        assert_eq!(built.stats.overwritten, 1);
    }

    #[test]
    fn test_both_directions_are_independent() {
        let records = vec![
            DistanceRecord::new("Boston", "Providence", 50.2),
            DistanceRecord::new("Providence", "Boston", 49.8),
        ];

        let built = GraphBuilder::new().build(&records).unwrap();
        assert_eq!(built.graph.weight(CityId(0), CityId(1)), Some(50.2));
        assert_eq!(built.graph.weight(CityId(1), CityId(0)), Some(49.8));
    }

    #[test]
    fn test_destination_only_city_gets_an_id() {
        let records = vec![DistanceRecord::new("Boston", "Concord", 70.0)];
        let built = GraphBuilder::new().build(&records).unwrap();

        let concord = built.index.id_of("Concord").unwrap();
        assert_eq!(built.graph.out_degree(concord), 0);
        assert!(built.graph.contains(concord));
    }

    #[test]
    fn test_self_loop_is_kept() {
        let records = vec![DistanceRecord::new("Boston", "Boston", 0.0)];
        let built = GraphBuilder::new().build(&records).unwrap();
        assert_eq!(built.graph.weight(CityId(0), CityId(0)), Some(0.0));
    }

    #[test]
    fn test_empty_input() {
        let built = GraphBuilder::new().build(&[]).unwrap();
        assert!(built.index.is_empty());
        assert_eq!(built.graph.city_count(), 0);
    }
}
