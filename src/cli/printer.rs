//! 结果打印器
//!
//! 以表格输出路径分段和图统计信息

use crate::algorithm::PathResult;
use crate::graph::{CityGraph, CityIndex};
use crate::types::format_miles;
use prettytable::{format, row, Cell, Row, Table};

/// 结果打印器
#[derive(Debug, Default, Clone, Copy)]
pub struct Printer;

impl Printer {
    pub fn new() -> Self {
        Self
    }

    /// `A -> B -> C`
    pub fn format_route(&self, index: &CityIndex, path: &PathResult) -> String {
        path.cities
            .iter()
            .map(|&id| index.name_of(id).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// 路径分段表格
    pub fn format_legs(&self, index: &CityIndex, graph: &CityGraph, path: &PathResult) -> String {
        let legs = path.legs(graph);
        if legs.is_empty() {
            return format!("Already at {}\n", self.format_route(index, path));
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["#", "From", "To", "Distance"]);

        for (i, (from, to, weight)) in legs.iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(&(i + 1).to_string()),
                Cell::new(index.name_of(*from).unwrap_or("?")),
                Cell::new(index.name_of(*to).unwrap_or("?")),
                Cell::new(&format_miles(*weight)),
            ]));
        }

        table.to_string()
    }

    /// 图统计信息
    pub fn format_stats(&self, city_count: usize, edge_count: usize) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["City Count", city_count.to_string()]);
        table.add_row(row!["Edge Count", edge_count.to_string()]);
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::shortest_path;
    use crate::graph::{CityId, DistanceRecord, GraphBuilder};

    #[test]
    fn test_format_route_and_legs() {
        let records = vec![
            DistanceRecord::new("A", "B", 5.0),
            DistanceRecord::new("B", "C", 3.0),
            DistanceRecord::new("A", "C", 10.0),
        ];
        let built = GraphBuilder::new().build(&records).unwrap();
        let path = shortest_path(&built.graph, CityId(0), CityId(2))
            .unwrap()
            .unwrap();

        let printer = Printer::new();
        assert_eq!(printer.format_route(&built.index, &path), "A -> B -> C");

        let legs = printer.format_legs(&built.index, &built.graph, &path);
        assert!(legs.contains("5.00 mi"));
        assert!(legs.contains("3.00 mi"));
    }

    #[test]
    fn test_format_single_city_path() {
        let records = vec![DistanceRecord::new("A", "B", 5.0)];
        let built = GraphBuilder::new().build(&records).unwrap();
        let path = shortest_path(&built.graph, CityId(1), CityId(1))
            .unwrap()
            .unwrap();

        let legs = Printer::new().format_legs(&built.index, &built.graph, &path);
        assert_eq!(legs, "Already at B\n");
    }

    #[test]
    fn test_format_stats() {
        let stats = Printer::new().format_stats(47, 2162);
        assert!(stats.contains("City Count"));
        assert!(stats.contains("2162"));
    }
}
