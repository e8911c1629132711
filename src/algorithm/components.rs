//! 连通分量遍历
//!
//! 按顶点表顺序依次取尚未访问的顶点作为根，对其所在分量做一次松弛扫描。
//! 访问标记在各次扫描之间保留，因此每个顶点只被一个分量处理；
//! 每条边在其第一个端点被访问时输出，恰好输出一次。

use super::relaxation::RelaxationEngine;
use crate::graph::{Edge, Graph};
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// 连通分量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// 扫描的起点
    pub root: Point,
    /// 分量内顶点（访问顺序）
    pub vertices: Vec<Point>,
    /// 扫描中发现的边（发现顺序）
    pub edges: Vec<Edge>,
    /// 边权之和
    pub total_weight: f64,
}

/// 连通分量遍历器
pub struct ComponentWalker<'g> {
    graph: &'g Graph,
}

impl<'g> ComponentWalker<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// 所有连通分量，按发现顺序
    pub fn components(&self) -> Vec<Component> {
        let table = self.graph.table();
        let metrics = self.graph.metrics();
        let timer = metrics.record_query_start();

        let mut engine = RelaxationEngine::new(self.graph);
        let mut components = Vec::new();

        for root in table.ids() {
            if engine.is_visited(root) {
                continue;
            }

            let first_settled = engine.settled().len();
            let mut edges = Vec::new();
            engine.sweep(root, |he| edges.push(he.edge()));
            metrics.record_relaxation_sweep();

            let vertices: Vec<Point> = engine.settled()[first_settled..]
                .iter()
                .filter_map(|&id| table.get(id).map(|v| v.point()))
                .collect();
            let total_weight = edges.iter().map(Edge::weight).sum();

            if let Some(&root_point) = vertices.first() {
                components.push(Component {
                    root: root_point,
                    vertices,
                    edges,
                    total_weight,
                });
            }
        }

        metrics.record_query_complete(timer);
        components
    }

    /// 展示整个图：各分量发现的边依次拼接
    pub fn show_graph(&self) -> Vec<Edge> {
        self.components()
            .into_iter()
            .flat_map(|component| component.edges)
            .collect()
    }

    /// 连通分量数量
    pub fn component_count(&self) -> usize {
        self.components().len()
    }
}
