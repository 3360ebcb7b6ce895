//! 通用类型定义：距离单位与换算

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 米到英里的换算系数
pub const METERS_TO_MILES: f64 = 0.00062137;

/// 距离单位
///
/// 图构建器本身不做单位换算，换算发生在导入阶段；
/// 引擎内部统一使用英里。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// 英里（目标单位）
    #[default]
    Miles,
    /// 米（路由 API 的原始输出）
    Meters,
}

impl DistanceUnit {
    /// 换算为英里
    pub fn to_miles(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Miles => value,
            DistanceUnit::Meters => value * METERS_TO_MILES,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnit::Miles => write!(f, "miles"),
            DistanceUnit::Meters => write!(f, "meters"),
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "miles" | "mi" => Ok(DistanceUnit::Miles),
            "meters" | "m" => Ok(DistanceUnit::Meters),
            other => Err(format!("未知的距离单位: {}", other)),
        }
    }
}

/// 格式化距离（保留两位小数）
pub fn format_miles(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2} mi", value)
    } else {
        "unreachable".to_string()
    }
}
