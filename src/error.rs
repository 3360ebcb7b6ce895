//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("城市不存在: {0}")]
    CityNotFound(String),

    #[error("城市 ID 越界: {id} (城市数 {count})")]
    CityIdOutOfRange { id: usize, count: usize },

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),

    #[error("渲染错误: {0}")]
    RenderError(String),

    #[error("算法错误: {0}")]
    AlgorithmError(String),

    #[error("交互错误: {0}")]
    ShellError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
