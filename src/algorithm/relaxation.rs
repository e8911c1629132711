//! 松弛引擎
//!
//! 基于选择的单源最短路（不使用优先队列）：每轮扫描全部顶点，
//! 取未访问且距离最小者标记为已访问，再松弛它的所有半边。
//! 单次运行 O(V² + E)。
//!
//! 距离、访问标记和前驱都保存在引擎内部，每次运行前重建，
//! 不会在相互独立的查询之间泄漏。

use crate::graph::{Graph, HalfEdge, VertexId, VertexTable};
use tracing::{debug, trace};

/// 单个顶点的临时遍历状态
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexState {
    /// 当前最短距离，`None` 表示尚未到达
    pub distance: Option<f64>,
    /// 是否已访问（距离已确定）
    pub visited: bool,
    /// 最短路上的前驱
    pub predecessor: Option<VertexId>,
}

/// 松弛引擎
pub struct RelaxationEngine<'g> {
    table: &'g VertexTable,
    /// 按顶点 ID 下标的状态
    states: Vec<VertexState>,
    /// 访问顺序
    settled: Vec<VertexId>,
}

impl<'g> RelaxationEngine<'g> {
    /// 创建引擎，所有顶点处于未到达状态
    pub fn new(graph: &'g Graph) -> Self {
        let table = graph.table();
        Self {
            table,
            states: vec![VertexState::default(); table.capacity()],
            settled: Vec::with_capacity(table.len()),
        }
    }

    /// 重置全部顶点的遍历状态
    pub fn reset(&mut self) {
        self.states.iter_mut().for_each(|s| *s = VertexState::default());
        self.settled.clear();
    }

    /// 从 `source` 运行一次完整的最短路计算
    pub fn run(&mut self, source: VertexId) {
        self.reset();
        self.sweep(source, |_| {});
    }

    /// 从 `source` 扫描，不重置已有的访问标记
    ///
    /// 之前运行中已访问的顶点不会再被选中，这使得多次调用可以
    /// 逐个处理连通分量。每条被检查的半边若远端尚未访问，
    /// 则交给 `on_edge`。`source` 已访问或不在图中时为空操作。
    pub fn sweep<F>(&mut self, source: VertexId, mut on_edge: F)
    where
        F: FnMut(&HalfEdge),
    {
        let table = self.table;
        if table.get(source).is_none() || self.states[source.index()].visited {
            return;
        }

        let first_settled = self.settled.len();
        self.states[source.index()].distance = Some(0.0);
        self.states[source.index()].predecessor = None;

        while let Some(current) = self.select_min() {
            let state = &mut self.states[current.index()];
            state.visited = true;
            let base = state.distance.unwrap_or_default();
            self.settled.push(current);

            let vertex = match table.get(current) {
                Some(vertex) => vertex,
                None => continue,
            };
            trace!(point = %vertex.point(), distance = base, "选中顶点");

            for he in vertex.half_edges() {
                let candidate = base + he.weight();
                let neighbor = &mut self.states[he.target().index()];
                if neighbor.distance.map_or(true, |d| candidate < d) {
                    neighbor.distance = Some(candidate);
                    neighbor.predecessor = Some(current);
                }
                if !neighbor.visited {
                    on_edge(he);
                }
            }
        }

        debug!(
            source = source.index(),
            settled = self.settled.len() - first_settled,
            "松弛扫描完成"
        );
    }

    /// 未访问且已到达的顶点中距离最小者，相等时取表顺序靠前者
    fn select_min(&self) -> Option<VertexId> {
        let mut best: Option<(VertexId, f64)> = None;
        for id in self.table.ids() {
            let state = &self.states[id.index()];
            if state.visited {
                continue;
            }
            if let Some(distance) = state.distance {
                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((id, distance));
                }
            }
        }
        best.map(|(id, _)| id)
    }

    /// 顶点状态
    pub fn state(&self, id: VertexId) -> VertexState {
        self.states.get(id.index()).copied().unwrap_or_default()
    }

    pub fn distance(&self, id: VertexId) -> Option<f64> {
        self.state(id).distance
    }

    pub fn is_visited(&self, id: VertexId) -> bool {
        self.state(id).visited
    }

    pub fn predecessor(&self, id: VertexId) -> Option<VertexId> {
        self.state(id).predecessor
    }

    /// 已访问顶点，按访问顺序
    pub fn settled(&self) -> &[VertexId] {
        &self.settled
    }

    /// 已访问顶点，按表顺序
    pub fn visited(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.table.ids().filter(move |&id| self.is_visited(id))
    }

    /// 沿前驱回溯到起点，返回正序路径；`target` 未访问时为 `None`
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_visited(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = self.predecessor(current) {
            // 前驱链长度不超过顶点数
            if path.len() > self.settled.len() {
                return None;
            }
            path.push(prev);
            current = prev;
        }
        path.reverse();

        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metrics;
    use crate::types::Point;
    use std::sync::Arc;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn create_test_graph() -> Graph {
        // 两个连通分量：
        //   (0,0)-(3,4)-(6,8)-(0,8)-(0,0)
        //   (20,0)-(20,5)
        let mut graph = Graph::with_metrics(Arc::new(Metrics::new()));
        graph.insert_edge(p(0, 0), p(3, 4)).unwrap();
        graph.insert_edge(p(3, 4), p(6, 8)).unwrap();
        graph.insert_edge(p(0, 0), p(0, 8)).unwrap();
        graph.insert_edge(p(0, 8), p(6, 8)).unwrap();
        graph.insert_edge(p(20, 0), p(20, 5)).unwrap();
        graph
    }

    fn id(graph: &Graph, point: Point) -> VertexId {
        graph.table().lookup(&point).unwrap()
    }

    #[test]
    fn test_run_distances() {
        let graph = create_test_graph();
        let mut engine = RelaxationEngine::new(&graph);

        engine.run(id(&graph, p(0, 0)));

        assert_eq!(engine.distance(id(&graph, p(0, 0))), Some(0.0));
        assert_eq!(engine.distance(id(&graph, p(3, 4))), Some(5.0));
        assert_eq!(engine.distance(id(&graph, p(0, 8))), Some(8.0));
        assert_eq!(engine.distance(id(&graph, p(6, 8))), Some(10.0));

        // 其他分量不可达
        assert_eq!(engine.distance(id(&graph, p(20, 0))), None);
        assert!(!engine.is_visited(id(&graph, p(20, 5))));
        assert_eq!(engine.settled().len(), 4);
    }

    #[test]
    fn test_relaxation_fixed_point() {
        let graph = create_test_graph();
        let mut engine = RelaxationEngine::new(&graph);
        engine.run(id(&graph, p(3, 4)));

        for a in engine.visited().collect::<Vec<_>>() {
            let da = engine.distance(a).unwrap();
            for he in graph.table().get(a).unwrap().half_edges() {
                let db = engine.distance(he.target()).unwrap();
                assert!(db <= da + he.weight() + 1e-9);
            }
        }
    }

    #[test]
    fn test_path_to() {
        let graph = create_test_graph();
        let mut engine = RelaxationEngine::new(&graph);
        engine.run(id(&graph, p(0, 0)));

        let path = engine.path_to(id(&graph, p(6, 8))).unwrap();
        let points: Vec<Point> = path
            .iter()
            .map(|&v| graph.table().get(v).unwrap().point())
            .collect();
        assert_eq!(points, vec![p(0, 0), p(3, 4), p(6, 8)]);

        assert!(engine.path_to(id(&graph, p(20, 5))).is_none());
        assert_eq!(engine.path_to(id(&graph, p(0, 0))).unwrap().len(), 1);
    }

    #[test]
    fn test_runs_do_not_leak_state() {
        let graph = create_test_graph();
        let mut engine = RelaxationEngine::new(&graph);

        engine.run(id(&graph, p(0, 0)));
        engine.run(id(&graph, p(20, 0)));

        assert_eq!(engine.distance(id(&graph, p(0, 0))), None);
        assert!(!engine.is_visited(id(&graph, p(6, 8))));
        assert_eq!(engine.distance(id(&graph, p(20, 5))), Some(5.0));
        assert_eq!(engine.predecessor(id(&graph, p(20, 0))), None);
    }

    #[test]
    fn test_sweep_keeps_visited() {
        let graph = create_test_graph();
        let mut engine = RelaxationEngine::new(&graph);

        let mut first = Vec::new();
        engine.sweep(id(&graph, p(0, 0)), |he| first.push(he.edge()));
        assert_eq!(first.len(), 4);

        // 已访问的源不会再次扫描
        let mut again = Vec::new();
        engine.sweep(id(&graph, p(6, 8)), |he| again.push(he.edge()));
        assert!(again.is_empty());

        let mut second = Vec::new();
        engine.sweep(id(&graph, p(20, 5)), |he| second.push(he.edge()));
        assert_eq!(second.len(), 1);
        assert_eq!(engine.settled().len(), graph.vertex_count());
    }

    #[test]
    fn test_stale_source_is_noop() {
        let graph = create_test_graph();
        let mut engine = RelaxationEngine::new(&graph);

        engine.run(VertexId::new(999));
        assert!(engine.settled().is_empty());
    }
}
