//! 单源最短路径（Dijkstra）
//!
//! 优先队列采用惰性删除：城市的暂定距离变小时直接重新入队，
//! 出队时跳过已确定的城市，不做 decrease-key。

use crate::error::{Error, Result};
use crate::graph::{CityGraph, CityId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// 优先队列条目
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: f64,
    city: CityId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap 是大顶堆，反转后距离小的先出队；距离相同时 ID 小的先出
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.city.cmp(&self.city))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 单源最短路径结果
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    start: CityId,
    /// 起点到各城市的最短距离，不可达为 +inf
    distances: Vec<f64>,
    /// 前驱映射，起点和不可达城市不在其中
    predecessors: HashMap<CityId, CityId>,
}

impl ShortestPaths {
    pub fn start(&self) -> CityId {
        self.start
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn predecessors(&self) -> &HashMap<CityId, CityId> {
        &self.predecessors
    }

    /// 到某城市的最短距离（越界时为 +inf）
    pub fn distance_to(&self, city: CityId) -> f64 {
        self.distances
            .get(city.as_usize())
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    pub fn predecessor_of(&self, city: CityId) -> Option<CityId> {
        self.predecessors.get(&city).copied()
    }

    pub fn is_reachable(&self, city: CityId) -> bool {
        self.distance_to(city).is_finite()
    }

    /// 重构从起点到 `end` 的路径，不可达返回 `None`
    pub fn path_to(&self, end: CityId) -> Result<Option<PathResult>> {
        if end.as_usize() >= self.distances.len() {
            return Err(Error::CityIdOutOfRange {
                id: end.as_usize(),
                count: self.distances.len(),
            });
        }

        let total_distance = self.distances[end.as_usize()];
        if total_distance == f64::INFINITY {
            return Ok(None);
        }

        let mut cities = Vec::new();
        let mut current = end;
        while current != self.start {
            cities.push(current);
            current = self.predecessor_of(current).ok_or_else(|| {
                Error::AlgorithmError(format!("城市 {} 缺少前驱", current))
            })?;
        }
        cities.push(self.start);
        cities.reverse();

        Ok(Some(PathResult::new(cities, total_distance)))
    }
}

/// 路径结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// 从起点到终点的城市序列（含两端）
    pub cities: Vec<CityId>,
    /// 路径总距离
    pub total_distance: f64,
    /// 路径边数
    pub hops: usize,
}

impl PathResult {
    fn new(cities: Vec<CityId>, total_distance: f64) -> Self {
        let hops = cities.len().saturating_sub(1);
        Self {
            cities,
            total_distance,
            hops,
        }
    }

    pub fn start(&self) -> Option<CityId> {
        self.cities.first().copied()
    }

    pub fn end(&self) -> Option<CityId> {
        self.cities.last().copied()
    }

    /// 路径上的每一段 (from, to, 距离)
    pub fn legs(&self, graph: &CityGraph) -> Vec<(CityId, CityId, f64)> {
        self.cities
            .windows(2)
            .map(|pair| {
                let weight = graph.weight(pair[0], pair[1]).unwrap_or(f64::NAN);
                (pair[0], pair[1], weight)
            })
            .collect()
    }
}

/// 计算 `start` 到所有城市的最短距离和前驱映射
///
/// 边权必须非负；负权不做校验，结果未定义。
pub fn shortest_distances(graph: &CityGraph, start: CityId) -> Result<ShortestPaths> {
    let city_count = graph.city_count();
    if start.as_usize() >= city_count {
        return Err(Error::CityIdOutOfRange {
            id: start.as_usize(),
            count: city_count,
        });
    }

    let mut distances = vec![f64::INFINITY; city_count];
    let mut visited = vec![false; city_count];
    let mut predecessors = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances[start.as_usize()] = 0.0;
    queue.push(QueueEntry {
        distance: 0.0,
        city: start,
    });

    while let Some(QueueEntry { distance, city }) = queue.pop() {
        // 过期条目
        if visited[city.as_usize()] {
            continue;
        }
        visited[city.as_usize()] = true;

        for (neighbor, weight) in graph.neighbors(city) {
            let candidate = distance + weight;
            if candidate < distances[neighbor.as_usize()] {
                distances[neighbor.as_usize()] = candidate;
                predecessors.insert(neighbor, city);
                queue.push(QueueEntry {
                    distance: candidate,
                    city: neighbor,
                });
            }
        }
    }

    debug!(
        start = start.as_usize(),
        reachable = distances.iter().filter(|d| d.is_finite()).count(),
        "最短距离计算完成"
    );

    Ok(ShortestPaths {
        start,
        distances,
        predecessors,
    })
}

/// 计算 `start` 到 `end` 的最短路径，不可达返回 `None`
pub fn shortest_path(graph: &CityGraph, start: CityId, end: CityId) -> Result<Option<PathResult>> {
    shortest_distances(graph, start)?.path_to(end)
}

/// 路径查找器，持有只读共享的城市图
#[derive(Debug, Clone)]
pub struct PathFinder {
    graph: Arc<CityGraph>,
}

impl PathFinder {
    /// 创建路径查找器
    pub fn new(graph: Arc<CityGraph>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &CityGraph {
        &self.graph
    }

    pub fn shortest_distances(&self, start: CityId) -> Result<ShortestPaths> {
        shortest_distances(&self.graph, start)
    }

    pub fn shortest_path(&self, start: CityId, end: CityId) -> Result<Option<PathResult>> {
        shortest_path(&self.graph, start, end)
    }

    /// 判断两点是否连通
    pub fn is_reachable(&self, start: CityId, end: CityId) -> Result<bool> {
        Ok(self.shortest_distances(start)?.is_reachable(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn graph_from(city_count: usize, edges: &[(usize, usize, f64)]) -> CityGraph {
        let mut graph = CityGraph::with_cities(city_count);
        for &(from, to, w) in edges {
            graph.set_edge(CityId(from), CityId(to), w);
        }
        graph
    }

    // A=0, B=1, C=2: A->B=5, B->C=3, A->C=10
    fn triangle() -> CityGraph {
        graph_from(3, &[(0, 1, 5.0), (1, 2, 3.0), (0, 2, 10.0)])
    }

    /// Bellman-Ford 参考实现
    fn reference_distances(graph: &CityGraph, start: CityId) -> Vec<f64> {
        let mut dist = vec![f64::INFINITY; graph.city_count()];
        dist[start.as_usize()] = 0.0;
        for _ in 0..graph.city_count() {
            for (from, to, w) in graph.edges() {
                let candidate = dist[from.as_usize()] + w;
                if candidate < dist[to.as_usize()] {
                    dist[to.as_usize()] = candidate;
                }
            }
        }
        dist
    }

    #[test]
    fn test_prefers_shorter_two_hop_path() {
        let graph = triangle();
        let path = shortest_path(&graph, CityId(0), CityId(2)).unwrap().unwrap();

        assert_eq!(path.cities, vec![CityId(0), CityId(1), CityId(2)]);
        assert_eq!(path.total_distance, 8.0);
        assert_eq!(path.hops, 2);
        assert_eq!(
            path.legs(&graph),
            vec![(CityId(0), CityId(1), 5.0), (CityId(1), CityId(2), 3.0)]
        );
    }

    #[test]
    fn test_directed_edges_have_no_reverse_path() {
        let mut graph = triangle();
        graph.remove_edge(CityId(0), CityId(2));

        assert_eq!(shortest_path(&graph, CityId(2), CityId(0)).unwrap(), None);
        let result = shortest_distances(&graph, CityId(2)).unwrap();
        assert_eq!(result.distance_to(CityId(0)), f64::INFINITY);
        assert_eq!(result.predecessor_of(CityId(0)), None);
    }

    #[test]
    fn test_start_equals_end() {
        let graph = triangle();
        for c in 0..3 {
            let path = shortest_path(&graph, CityId(c), CityId(c)).unwrap().unwrap();
            assert_eq!(path.cities, vec![CityId(c)]);
            assert_eq!(path.total_distance, 0.0);
            assert_eq!(path.hops, 0);
        }
    }

    #[test]
    fn test_start_distance_is_zero() {
        let graph = triangle();
        for c in 0..graph.city_count() {
            let result = shortest_distances(&graph, CityId(c)).unwrap();
            assert_eq!(result.distance_to(CityId(c)), 0.0);
            assert_eq!(result.predecessor_of(CityId(c)), None);
        }
    }

    #[test]
    fn test_isolated_city_unreachable() {
        let graph = graph_from(4, &[(0, 1, 2.0), (1, 2, 2.0)]);
        let result = shortest_distances(&graph, CityId(0)).unwrap();

        assert!(!result.is_reachable(CityId(3)));
        assert_eq!(result.distances()[3], f64::INFINITY);
        assert!(!result.predecessors().contains_key(&CityId(3)));
        assert_eq!(result.path_to(CityId(3)).unwrap(), None);
    }

    #[test]
    fn test_zero_weight_edges() {
        let graph = graph_from(3, &[(0, 1, 0.0), (1, 2, 0.0), (0, 2, 1.0)]);
        let path = shortest_path(&graph, CityId(0), CityId(2)).unwrap().unwrap();
        assert_eq!(path.cities, vec![CityId(0), CityId(1), CityId(2)]);
        assert_eq!(path.total_distance, 0.0);
    }

    #[test]
    fn test_out_of_range_ids() {
        let graph = triangle();
        assert!(matches!(
            shortest_distances(&graph, CityId(3)),
            Err(Error::CityIdOutOfRange { id: 3, count: 3 })
        ));
        assert!(matches!(
            shortest_path(&graph, CityId(0), CityId(7)),
            Err(Error::CityIdOutOfRange { id: 7, count: 3 })
        ));
    }

    #[test]
    fn test_idempotent_and_graph_unchanged() {
        let graph = triangle();
        let before = graph.edges().collect::<Vec<_>>();

        let first = shortest_distances(&graph, CityId(0)).unwrap();
        let second = shortest_distances(&graph, CityId(0)).unwrap();

        assert_eq!(first, second);
        assert_eq!(graph.edges().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_path_finder_shared_graph() {
        let finder = PathFinder::new(Arc::new(triangle()));
        assert!(finder.is_reachable(CityId(0), CityId(2)).unwrap());
        assert!(!finder.is_reachable(CityId(2), CityId(0)).unwrap());

        let path = finder.shortest_path(CityId(1), CityId(2)).unwrap().unwrap();
        assert_eq!(path.start(), Some(CityId(1)));
        assert_eq!(path.end(), Some(CityId(2)));
    }

    #[test]
    fn test_matches_reference_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let n = rng.gen_range(1..12);
            let mut graph = CityGraph::with_cities(n);
            for from in 0..n {
                for to in 0..n {
                    if rng.gen_bool(0.3) {
                        let w = rng.gen_range(0.0..100.0);
                        graph.set_edge(CityId(from), CityId(to), w);
                    }
                }
            }

            for s in 0..n {
                let start = CityId(s);
                let result = shortest_distances(&graph, start).unwrap();
                let expected = reference_distances(&graph, start);

                for (got, want) in result.distances().iter().zip(&expected) {
                    if want.is_finite() {
                        assert!((got - want).abs() < 1e-9, "got {}, want {}", got, want);
                    } else {
                        assert_eq!(*got, f64::INFINITY);
                    }
                }

                // 松弛最优性：所有边都满足 d[to] <= d[from] + w
                for (from, to, w) in graph.edges() {
                    let via = result.distance_to(from) + w;
                    assert!(result.distance_to(to) <= via + 1e-9);
                }

                // 可达城市的路径首尾正确，且路径长度与距离一致
                for e in 0..n {
                    let end = CityId(e);
                    match result.path_to(end).unwrap() {
                        Some(path) => {
                            assert_eq!(path.start(), Some(start));
                            assert_eq!(path.end(), Some(end));
                            let sum: f64 = path.legs(&graph).iter().map(|l| l.2).sum();
                            assert!((sum - path.total_distance).abs() < 1e-9);
                        }
                        None => assert!(!result.is_reachable(end)),
                    }
                }
            }
        }
    }
}
