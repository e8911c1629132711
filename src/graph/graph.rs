//! 图数据结构
//!
//! 平面整数点上的无向图：增量插入/删除边，并对外提供可达性、
//! 最短路径和按连通分量展示的查询入口。

use super::edge::{Edge, HalfEdge};
use super::table::VertexTable;
use super::vertex::{Vertex, VertexId};
use crate::algorithm::{ComponentWalker, PathFinder};
use crate::error::{Error, Result};
use crate::metrics::{self, Metrics};
use crate::types::Point;
use std::sync::Arc;
use tracing::{debug, warn};

/// 图
///
/// 顶点在第一次作为边端点出现时创建，在最后一条关联边被删除时移除，
/// 因此表中不存在度为 0 的顶点。
#[derive(Debug)]
pub struct Graph {
    /// 顶点表（每个顶点持有自己的邻接表）
    vertices: VertexTable,
    /// 无向边数量
    edge_count: usize,
    /// 指标收集器
    metrics: Arc<Metrics>,
}

impl Graph {
    /// 创建空图（使用全局指标）
    pub fn new() -> Self {
        Self::with_metrics(metrics::global_metrics())
    }

    /// 创建空图并指定指标收集器
    pub fn with_metrics(metrics: Arc<Metrics>) -> Self {
        Self {
            vertices: VertexTable::new(),
            edge_count: 0,
            metrics,
        }
    }

    /// 获取顶点表
    pub fn table(&self) -> &VertexTable {
        &self.vertices
    }

    /// 获取指标收集器
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    // ==================== 顶点查询 ====================

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains_vertex(&self, point: &Point) -> bool {
        self.vertices.lookup(point).is_some()
    }

    /// 获取顶点
    pub fn vertex(&self, point: &Point) -> Option<&Vertex> {
        self.vertices.get_by_point(point)
    }

    /// 所有顶点坐标（表顺序）
    pub fn vertices(&self) -> Vec<Point> {
        self.vertices.points().collect()
    }

    /// 顶点的度，不存在时为 0
    pub fn degree(&self, point: &Point) -> usize {
        self.vertex(point).map(Vertex::degree).unwrap_or(0)
    }

    /// 顶点的邻居（邻接表顺序，最新插入的在前）
    pub fn neighbors(&self, point: &Point) -> Vec<Point> {
        self.vertex(point)
            .map(|v| v.neighbors().collect())
            .unwrap_or_default()
    }

    // ==================== 边操作 ====================

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// 两点之间是否有边（无向）
    pub fn contains_edge(&self, p1: &Point, p2: &Point) -> bool {
        self.vertex(p1)
            .map(|v| v.edge_to(p2).is_some())
            .unwrap_or(false)
    }

    /// 所有边，每条无向边只出现一次（以先出现在表中的端点为 p1）
    pub fn edges(&self) -> Vec<Edge> {
        let mut seen = std::collections::HashSet::new();
        let mut edges = Vec::with_capacity(self.edge_count);
        for vertex in self.vertices.iter() {
            seen.insert(vertex.id());
            for he in vertex.half_edges() {
                if !seen.contains(&he.target()) {
                    edges.push(he.edge());
                }
            }
        }
        edges
    }

    /// 插入边
    ///
    /// 返回 `Ok(true)` 表示新插入，`Ok(false)` 表示边已存在（无任何变更）。
    /// 两端点相同的边返回 [`Error::DegenerateEdge`]。
    pub fn insert_edge(&mut self, p1: Point, p2: Point) -> Result<bool> {
        let edge = Edge::new(p1, p2);
        if edge.is_degenerate() {
            warn!(point = %p1, "拒绝插入退化边");
            return Err(Error::DegenerateEdge(p1));
        }

        let (first, first_created) = self.vertices.get_or_insert(p1);
        let (second, second_created) = self.vertices.get_or_insert(p2);
        for (point, created) in [(p1, first_created), (p2, second_created)] {
            if created {
                self.metrics.record_vertex_create();
                debug!(%point, "创建顶点");
            }
        }

        let exists = self
            .vertices
            .get(first)
            .map(|v| v.has_edge(&edge))
            .unwrap_or(false);
        if exists {
            debug!(%edge, "边已存在");
            self.metrics.record_duplicate_insert();
            return Ok(false);
        }

        // 两条半边都引用表中的规范顶点，而不是调用者传入的值
        let forward = HalfEdge::new(second, edge);
        let backward = HalfEdge::new(first, edge.reversed());
        self.vertex_mut(first)?.push_front(forward);
        self.vertex_mut(second)?.push_front(backward);

        self.edge_count += 1;
        self.metrics.record_edge_insert();
        debug!(%edge, vertices = self.vertex_count(), edges = self.edge_count, "插入边");

        Ok(true)
    }

    /// 删除边
    ///
    /// 边不存在时不做任何变更：端点缺失返回 [`Error::VertexNotFound`]，
    /// 端点都在但不相邻返回 [`Error::EdgeNotFound`]。
    /// 删除后度为 0 的端点从顶点表中移除。
    pub fn delete_edge(&mut self, p1: Point, p2: Point) -> Result<()> {
        for point in [p1, p2] {
            if !self.contains_vertex(&point) {
                warn!(%point, "删除边失败: 端点不存在");
                self.metrics.record_rejected_delete();
                return Err(Error::VertexNotFound(point));
            }
        }
        if !self.contains_edge(&p1, &p2) {
            warn!(%p1, %p2, "删除边失败: 边不存在");
            self.metrics.record_rejected_delete();
            return Err(Error::EdgeNotFound(p1, p2));
        }

        let removed_forward = self.vertex_by_point_mut(&p1)?.remove_edge_to(&p2);
        let removed_backward = self.vertex_by_point_mut(&p2)?.remove_edge_to(&p1);
        if !(removed_forward && removed_backward) {
            return Err(Error::InternalError(format!(
                "边 {}-{} 的半边不对称",
                p1, p2
            )));
        }

        self.edge_count -= 1;
        self.metrics.record_edge_delete();
        debug!(%p1, %p2, edges = self.edge_count, "删除边");

        for point in [p1, p2] {
            if self.degree(&point) == 0 && self.vertices.remove(&point).is_some() {
                self.metrics.record_vertex_remove();
                debug!(%point, vertices = self.vertex_count(), "移除孤立顶点");
            }
        }

        Ok(())
    }

    /// 清空图
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edge_count = 0;
    }

    /// 释放整个图
    ///
    /// 按值接收，释放后原图不可再用，重复释放在编译期即被拒绝。
    pub fn free(self) {
        debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count,
            "释放图"
        );
        drop(self);
    }

    // ==================== 查询 ====================

    /// 从 `source` 可达的顶点（不含自身），`source` 不存在时为空
    pub fn reachable_vertices(&self, source: Point) -> Vec<Point> {
        PathFinder::new(self).reachable_vertices(source)
    }

    /// `u` 到 `v` 的最短路径（含两端），不可达时为空
    pub fn shortest_path(&self, u: Point, v: Point) -> Vec<Point> {
        PathFinder::new(self)
            .shortest_path(u, v)
            .map(|path| path.vertices)
            .unwrap_or_default()
    }

    /// 逐个连通分量遍历，按发现顺序返回边
    pub fn show_graph(&self) -> Vec<Edge> {
        ComponentWalker::new(self).show_graph()
    }

    // ==================== 一致性检查 ====================

    /// 校验不变量：坐标唯一、半边成对、无孤立顶点、计数一致
    pub fn validate(&self) -> Result<()> {
        let mut half_edges = 0usize;
        let mut listed = 0usize;

        for vertex in self.vertices.iter() {
            listed += 1;
            let point = vertex.point();
            if self.vertices.lookup(&point) != Some(vertex.id()) {
                return Err(Error::InternalError(format!("顶点 {} 索引不一致", point)));
            }
            if vertex.is_isolated() {
                return Err(Error::InternalError(format!("顶点 {} 度为 0", point)));
            }

            for he in vertex.half_edges() {
                half_edges += 1;
                if he.source_point() != point {
                    return Err(Error::InternalError(format!(
                        "半边 {} 不属于顶点 {}",
                        he.edge(),
                        point
                    )));
                }
                let twins = self
                    .vertices
                    .get(he.target())
                    .filter(|target| target.point() == he.target_point())
                    .map(|target| {
                        target
                            .half_edges()
                            .iter()
                            .filter(|back| back.edge() == he.edge().reversed())
                            .count()
                    })
                    .unwrap_or(0);
                if twins != 1 {
                    return Err(Error::InternalError(format!(
                        "半边 {} 的反向半边数量为 {}",
                        he.edge(),
                        twins
                    )));
                }
                let duplicates = vertex
                    .half_edges()
                    .iter()
                    .filter(|other| other.target_point() == he.target_point())
                    .count();
                if duplicates != 1 {
                    return Err(Error::InternalError(format!("重复边 {}", he.edge())));
                }
            }
        }

        if listed != self.vertices.len() {
            return Err(Error::InternalError(format!(
                "顶点表遍历数 {} 与顶点数 {} 不一致",
                listed,
                self.vertices.len()
            )));
        }
        if half_edges != self.edge_count * 2 {
            return Err(Error::InternalError(format!(
                "半边数 {} 与边数 {} 不一致",
                half_edges, self.edge_count
            )));
        }

        Ok(())
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| Error::InternalError(format!("顶点槽位 {} 为空", id.index())))
    }

    fn vertex_by_point_mut(&mut self, point: &Point) -> Result<&mut Vertex> {
        self.vertices
            .get_by_point_mut(point)
            .ok_or(Error::VertexNotFound(*point))
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
