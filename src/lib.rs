//! PointGraph - 平面整点无向加权图
//!
//! 顶点是整数坐标点，边权为两端点的欧氏距离，支持：
//! - 增量插入与删除边，孤立顶点自动回收
//! - 可达性与最短路径查询（基于选择的松弛，不使用优先队列）
//! - 按连通分量展示全部边
//! - CSV / JSON Lines 批量导入与交互式命令行

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod metrics;
pub mod types;

// 重导出常用类型
pub use algorithm::{Component, ComponentWalker, PathFinder, PathResult};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Vertex, VertexId, VertexTable};
pub use metrics::Metrics;
pub use types::Point;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
