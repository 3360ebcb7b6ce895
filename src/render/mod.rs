//! 地图渲染模块
//!
//! 生成 Leaflet HTML 页面：所有城市显示为标记，最短路径显示为折线

use crate::algorithm::PathResult;
use crate::error::{Error, Result};
use crate::geo::{Coordinate, CoordinateLookup};
use crate::graph::CityIndex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 默认输出文件名
pub const DEFAULT_MAP_FILE: &str = "shortest_path_map.html";

#[derive(Debug, Serialize)]
struct Marker<'a> {
    name: &'a str,
    position: [f64; 2],
}

/// 地图渲染器
#[derive(Debug, Clone)]
pub struct MapRenderer {
    /// 地图中心
    pub center: Coordinate,
    /// 缩放级别
    pub zoom: u8,
    /// 路径颜色
    pub line_color: String,
    pub line_weight: f64,
    pub line_opacity: f64,
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self {
            center: Coordinate::new(42.3601, -71.0589),
            zoom: 10,
            line_color: "red".to_string(),
            line_weight: 2.5,
            line_opacity: 1.0,
        }
    }
}

impl MapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 默认输出路径：桌面目录，其次主目录，最后当前目录
    pub fn default_output_path() -> PathBuf {
        dirs::desktop_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_MAP_FILE)
    }

    /// 渲染 HTML
    pub fn render_html(
        &self,
        index: &CityIndex,
        path: &PathResult,
        lookup: &dyn CoordinateLookup,
    ) -> Result<String> {
        let markers: Vec<Marker<'_>> = index
            .iter()
            .map(|(_, name)| Marker {
                name,
                position: lookup.coordinate_or_default(name).to_pair(),
            })
            .collect();

        let mut line = Vec::with_capacity(path.cities.len());
        for &id in &path.cities {
            let name = index.name_of(id).ok_or_else(|| {
                Error::RenderError(format!("路径中的城市 {} 不在索引中", id))
            })?;
            let coordinate = match lookup.coordinate(name) {
                Some(c) => c,
                None => {
                    warn!(city = name, "缺少坐标，使用 (0, 0)");
                    Coordinate::default()
                }
            };
            line.push(coordinate.to_pair());
        }

        let markers_json = serde_json::to_string(&markers)?;
        let line_json = serde_json::to_string(&line)?;
        let center_json = serde_json::to_string(&self.center.to_pair())?;
        let style_json = serde_json::to_string(&serde_json::json!({
            "color": self.line_color,
            "weight": self.line_weight,
            "opacity": self.line_opacity,
        }))?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>Shortest Path</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const map = L.map("map").setView({center}, {zoom});
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
for (const m of {markers}) {{
  L.marker(m.position).bindPopup(m.name).addTo(map);
}}
L.polyline({line}, {style}).addTo(map);
</script>
</body>
</html>
"#,
            center = center_json,
            zoom = self.zoom,
            markers = markers_json,
            line = line_json,
            style = style_json,
        ))
    }

    /// 渲染并保存到文件
    pub fn save<P: AsRef<Path>>(
        &self,
        output: P,
        index: &CityIndex,
        path: &PathResult,
        lookup: &dyn CoordinateLookup,
    ) -> Result<()> {
        let html = self.render_html(index, path, lookup)?;
        fs::write(output.as_ref(), html)?;
        info!(output = %output.as_ref().display(), "地图已保存");
        Ok(())
    }
}
