//! 图算法模块
//!
//! 松弛引擎（选择式单源最短路）及其三个调用方：
//! 可达性、最短路径、按连通分量展示

mod components;
mod path;
mod relaxation;

pub use components::{Component, ComponentWalker};
pub use path::{PathFinder, PathResult};
pub use relaxation::{RelaxationEngine, VertexState};
