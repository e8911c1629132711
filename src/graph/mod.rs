//! 图核心模块
//!
//! 定义顶点、边、顶点表和图的核心数据结构

mod edge;
mod graph;
mod table;
mod vertex;

pub use edge::{Edge, HalfEdge};
pub use graph::Graph;
pub use table::VertexTable;
pub use vertex::{Adjacency, Vertex, VertexId};
