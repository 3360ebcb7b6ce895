//! 数据导入模块
//!
//! 从 CSV 读取距离表与城市坐标表，并清洗距离采集脚本的原始输出

use crate::error::{Error, Result};
use crate::geo::{Coordinate, CoordinateTable};
use crate::graph::DistanceRecord;
use crate::types::DistanceUnit;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// 导入统计
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub rows_read: usize,
    pub rows_accepted: usize,
    pub duration_ms: u64,
}

/// 距离表行：start,end,distance（其余列忽略）
#[derive(Debug, Deserialize)]
struct DistanceRow {
    start: String,
    end: String,
    distance: f64,
}

/// 坐标表行：city,lat,lon（其余列忽略）
#[derive(Debug, Deserialize)]
struct CityRow {
    city: String,
    lat: f64,
    lon: f64,
}

/// 采集脚本的原始输出：origin,destination,distance(m),start,end
#[derive(Debug, Deserialize)]
struct RawDistanceRow {
    #[serde(rename = "distance(m)")]
    distance_m: f64,
    start: String,
    end: String,
}

/// CSV 导入器
#[derive(Debug, Default, Clone)]
pub struct Importer {
    unit: DistanceUnit,
}

impl Importer {
    /// 创建导入器（默认输入单位为英里）
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置输入距离单位
    pub fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    /// 读取距离表，距离换算为英里
    pub fn read_distances<R: Read>(&self, reader: R) -> Result<(Vec<DistanceRecord>, ImportStats)> {
        let start = std::time::Instant::now();
        let mut stats = ImportStats::default();
        let mut records = Vec::new();

        let mut rdr = csv_reader(reader);
        for (i, row) in rdr.deserialize::<DistanceRow>().enumerate() {
            stats.rows_read += 1;
            let row = row.map_err(|e| row_error(i, e))?;

            if row.distance < 0.0 {
                warn!(start = %row.start, end = %row.end, distance = row.distance, "负距离，最短路径结果未定义");
            }

            records.push(DistanceRecord::new(
                row.start.trim(),
                row.end.trim(),
                self.unit.to_miles(row.distance),
            ));
            stats.rows_accepted += 1;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(rows = stats.rows_accepted, unit = %self.unit, "距离表导入完成");
        Ok((records, stats))
    }

    /// 从文件读取距离表
    pub fn import_distances<P: AsRef<Path>>(&self, path: P) -> Result<(Vec<DistanceRecord>, ImportStats)> {
        let file = File::open(path)?;
        self.read_distances(file)
    }

    /// 读取城市坐标表
    pub fn read_coordinates<R: Read>(&self, reader: R) -> Result<(CoordinateTable, ImportStats)> {
        let start = std::time::Instant::now();
        let mut stats = ImportStats::default();
        let mut table = CoordinateTable::new();

        let mut rdr = csv_reader(reader);
        for (i, row) in rdr.deserialize::<CityRow>().enumerate() {
            stats.rows_read += 1;
            let row = row.map_err(|e| row_error(i, e))?;

            if table
                .insert(&row.city, Coordinate::new(row.lat, row.lon))
                .is_some()
            {
                warn!(city = row.city.trim(), "重复的城市坐标，保留最后一条");
            }
            stats.rows_accepted += 1;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(cities = table.len(), "坐标表导入完成");
        Ok((table, stats))
    }

    /// 从文件读取城市坐标表
    pub fn import_coordinates<P: AsRef<Path>>(&self, path: P) -> Result<(CoordinateTable, ImportStats)> {
        let file = File::open(path)?;
        self.read_coordinates(file)
    }

    /// 清洗原始采集数据：只保留 start,end,distance，米换算为英里，去除名称空白
    pub fn clean_raw<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<ImportStats> {
        let start = std::time::Instant::now();
        let mut stats = ImportStats::default();
        let mut out = csv::Writer::from_writer(writer);

        let mut rdr = csv_reader(reader);
        for (i, row) in rdr.deserialize::<RawDistanceRow>().enumerate() {
            stats.rows_read += 1;
            let row = row.map_err(|e| row_error(i, e))?;

            out.serialize(DistanceRecord::new(
                row.start.trim(),
                row.end.trim(),
                DistanceUnit::Meters.to_miles(row.distance_m),
            ))?;
            stats.rows_accepted += 1;
        }

        out.flush()?;
        stats.duration_ms = start.elapsed().as_millis() as u64;
        Ok(stats)
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// 行号从 1 开始，第 1 行是表头
fn row_error(index: usize, e: csv::Error) -> Error {
    Error::ImportError(format!("第 {} 行: {}", index + 2, e))
}

/// 从文件加载距离记录
pub fn load_distance_records<P: AsRef<Path>>(path: P, unit: DistanceUnit) -> Result<Vec<DistanceRecord>> {
    let (records, _) = Importer::new().with_unit(unit).import_distances(path)?;
    Ok(records)
}

/// 从文件加载城市坐标
pub fn load_coordinates<P: AsRef<Path>>(path: P) -> Result<CoordinateTable> {
    let (table, _) = Importer::new().import_coordinates(path)?;
    Ok(table)
}

/// 清洗原始采集文件并写出英里距离表
pub fn clean_raw_distances<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ImportStats> {
    let reader = File::open(input)?;
    let writer = File::create(output)?;
    Importer::new().clean_raw(reader, writer)
}
