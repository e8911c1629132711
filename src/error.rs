//! 错误类型定义

use crate::types::Point;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    VertexNotFound(Point),

    #[error("边不存在: {0}-{1}")]
    EdgeNotFound(Point, Point),

    #[error("退化边（两端点相同）: {0}")]
    DegenerateEdge(Point),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl Error {
    /// 是否为可忽略的“未找到”类错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::VertexNotFound(_) | Error::EdgeNotFound(_, _))
    }
}
