//! 边定义
//!
//! 无向边在两个端点的邻接表中各存一条半边

use crate::graph::vertex::VertexId;
use crate::types::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边：一对端点
///
/// 相等比较区分方向：`(p1, p2)` 与 `(p2, p1)` 不相等。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// 第一个端点
    p1: Point,
    /// 第二个端点
    p2: Point,
}

impl Edge {
    /// 创建新边
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// 获取第一个端点
    pub fn p1(&self) -> Point {
        self.p1
    }

    /// 获取第二个端点
    pub fn p2(&self) -> Point {
        self.p2
    }

    /// 获取边的权重（端点间欧氏距离，每次重新计算）
    pub fn weight(&self) -> f64 {
        self.p1.distance_to(&self.p2)
    }

    /// 反向边
    pub fn reversed(&self) -> Self {
        Self::new(self.p2, self.p1)
    }

    /// 两端点是否相同
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.p1, self.p2)
    }
}

/// 半边：存放在所属顶点的邻接表中，`edge.p1()` 恒为所属顶点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfEdge {
    /// 远端顶点
    target: VertexId,
    /// 端点坐标（所属顶点在前）
    edge: Edge,
}

impl HalfEdge {
    pub(crate) fn new(target: VertexId, edge: Edge) -> Self {
        Self { target, edge }
    }

    /// 远端顶点 ID
    pub fn target(&self) -> VertexId {
        self.target
    }

    /// 近端坐标
    pub fn source_point(&self) -> Point {
        self.edge.p1()
    }

    /// 远端坐标
    pub fn target_point(&self) -> Point {
        self.edge.p2()
    }

    /// 对应的边
    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn weight(&self) -> f64 {
        self.edge.weight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_weight() {
        let e = Edge::new(Point::new(0, 0), Point::new(3, 4));
        assert_eq!(e.weight(), 5.0);
        assert_eq!(e.reversed().weight(), 5.0);
    }

    #[test]
    fn test_edge_orientation() {
        let e = Edge::new(Point::new(0, 0), Point::new(0, 8));
        let r = e.reversed();

        assert_ne!(e, r);
        assert_eq!(r.reversed(), e);
        assert_eq!(r.p1(), Point::new(0, 8));
    }

    #[test]
    fn test_edge_display() {
        let e = Edge::new(Point::new(0, 0), Point::new(5, 6));
        assert_eq!(e.to_string(), "(0,0),(5,6)");
        assert!(Edge::new(Point::new(1, 1), Point::new(1, 1)).is_degenerate());
    }

    #[test]
    fn test_half_edge_accessors() {
        let he = HalfEdge::new(
            VertexId::new(7),
            Edge::new(Point::new(6, 8), Point::new(0, 8)),
        );

        assert_eq!(he.target(), VertexId::new(7));
        assert_eq!(he.source_point(), Point::new(6, 8));
        assert_eq!(he.target_point(), Point::new(0, 8));
        assert_eq!(he.weight(), 6.0);
    }
}
