//! 顶点定义
//!
//! 顶点表中的一项：坐标 + 邻接表（该顶点的全部半边）

use crate::graph::edge::{Edge, HalfEdge};
use crate::types::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// 顶点 ID（顶点表中的槽位下标，顶点存活期间稳定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// 邻接表，最新插入的半边在最前
pub type Adjacency = SmallVec<[HalfEdge; 4]>;

/// 顶点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 坐标（顶点身份）
    point: Point,
    /// 邻接表
    edges: Adjacency,
}

impl Vertex {
    /// 创建新顶点（度为 0，仅在插入边的过程中短暂存在）
    pub(crate) fn new(id: VertexId, point: Point) -> Self {
        Self {
            id,
            point,
            edges: SmallVec::new(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取坐标
    pub fn point(&self) -> Point {
        self.point
    }

    /// 度
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn is_isolated(&self) -> bool {
        self.edges.is_empty()
    }

    /// 全部半边（邻接表顺序）
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.edges
    }

    /// 邻居坐标（邻接表顺序）
    pub fn neighbors(&self) -> impl Iterator<Item = Point> + '_ {
        self.edges.iter().map(|he| he.target_point())
    }

    /// 查找指向 `target` 的半边
    pub fn edge_to(&self, target: &Point) -> Option<&HalfEdge> {
        self.edges.iter().find(|he| he.target_point() == *target)
    }

    /// 是否存在与 `edge` 方向一致的半边
    pub fn has_edge(&self, edge: &Edge) -> bool {
        self.edges.iter().any(|he| he.edge() == *edge)
    }

    /// 在邻接表头部插入半边
    pub(crate) fn push_front(&mut self, half_edge: HalfEdge) {
        self.edges.insert(0, half_edge);
    }

    /// 移除指向 `target` 的半边，返回是否找到
    pub(crate) fn remove_edge_to(&mut self, target: &Point) -> bool {
        match self.edges.iter().position(|he| he.target_point() == *target) {
            Some(pos) => {
                self.edges.remove(pos);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_adjacency_order() {
        let origin = Point::new(0, 0);
        let mut v = Vertex::new(VertexId::new(0), origin);
        assert!(v.is_isolated());

        v.push_front(HalfEdge::new(
            VertexId::new(1),
            Edge::new(origin, Point::new(0, 10)),
        ));
        v.push_front(HalfEdge::new(
            VertexId::new(2),
            Edge::new(origin, Point::new(5, 6)),
        ));

        assert_eq!(v.degree(), 2);
        let neighbors: Vec<Point> = v.neighbors().collect();
        assert_eq!(neighbors, vec![Point::new(5, 6), Point::new(0, 10)]);
        assert!(v.has_edge(&Edge::new(origin, Point::new(0, 10))));
        assert!(!v.has_edge(&Edge::new(Point::new(0, 10), origin)));
    }

    #[test]
    fn test_vertex_remove_edge() {
        let origin = Point::new(0, 0);
        let mut v = Vertex::new(VertexId::new(0), origin);
        v.push_front(HalfEdge::new(
            VertexId::new(1),
            Edge::new(origin, Point::new(3, 4)),
        ));

        assert!(!v.remove_edge_to(&Point::new(9, 9)));
        assert_eq!(v.degree(), 1);
        assert!(v.remove_edge_to(&Point::new(3, 4)));
        assert!(v.is_isolated());
        assert!(v.edge_to(&Point::new(3, 4)).is_none());
    }
}
