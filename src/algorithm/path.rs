//! 路径查询
//!
//! 可达性与最短路径，均由一次松弛引擎运行得到

use super::relaxation::RelaxationEngine;
use crate::graph::{Graph, VertexId};
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// 路径结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// 路径上的顶点序列（含起点和终点）
    pub vertices: Vec<Point>,
    /// 路径长度（边数）
    pub length: usize,
    /// 路径总权重（欧氏长度之和）
    pub total_weight: f64,
}

impl PathResult {
    fn from_points(vertices: Vec<Point>) -> Self {
        let total_weight = vertices
            .windows(2)
            .fold(0.0, |acc, pair| acc + pair[0].distance_to(&pair[1]));
        Self {
            length: vertices.len().saturating_sub(1),
            vertices,
            total_weight,
        }
    }
}

/// 路径查找器
pub struct PathFinder<'g> {
    graph: &'g Graph,
}

impl<'g> PathFinder<'g> {
    /// 创建路径查找器
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// 从 `source` 运行一次引擎；`source` 不在图中时返回 `None`
    fn run_from(&self, source: &Point) -> Option<(RelaxationEngine<'g>, VertexId)> {
        let id = self.graph.table().lookup(source)?;
        let metrics = self.graph.metrics();
        let timer = metrics.record_query_start();

        let mut engine = RelaxationEngine::new(self.graph);
        engine.run(id);

        metrics.record_relaxation_sweep();
        metrics.record_query_complete(timer);
        Some((engine, id))
    }

    fn point_of(&self, id: VertexId) -> Option<Point> {
        self.graph.table().get(id).map(|v| v.point())
    }

    /// 可达顶点（不含起点，按顶点表顺序）
    pub fn reachable_vertices(&self, source: Point) -> Vec<Point> {
        let Some((engine, source_id)) = self.run_from(&source) else {
            return Vec::new();
        };

        engine
            .visited()
            .filter(|&id| id != source_id)
            .filter_map(|id| self.point_of(id))
            .collect()
    }

    /// 最短路径，不可达或任一端点不存在时为 `None`
    pub fn shortest_path(&self, start: Point, end: Point) -> Option<PathResult> {
        let (engine, _) = self.run_from(&start)?;
        let end_id = self.graph.table().lookup(&end)?;

        let ids = engine.path_to(end_id)?;
        let vertices = ids
            .into_iter()
            .filter_map(|id| self.point_of(id))
            .collect();

        Some(PathResult::from_points(vertices))
    }

    /// 最短距离
    pub fn distance(&self, start: Point, end: Point) -> Option<f64> {
        let (engine, _) = self.run_from(&start)?;
        let end_id = self.graph.table().lookup(&end)?;
        engine.distance(end_id).filter(|_| engine.is_visited(end_id))
    }

    /// 判断两点是否连通
    pub fn is_reachable(&self, start: Point, end: Point) -> bool {
        self.distance(start, end).is_some()
    }

    /// 所有可达顶点及其最短距离（含起点，按访问顺序，即距离非降序）
    pub fn distances_from(&self, source: Point) -> Vec<(Point, f64)> {
        let Some((engine, _)) = self.run_from(&source) else {
            return Vec::new();
        };

        engine
            .settled()
            .iter()
            .filter_map(|&id| Some((self.point_of(id)?, engine.distance(id)?)))
            .collect()
    }
}
