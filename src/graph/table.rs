//! 顶点表
//!
//! 以槽位数组存放顶点，按坐标去重；坐标到 ID 的索引保留插入顺序，
//! 该顺序即顶点表的遍历顺序。

use crate::graph::vertex::{Vertex, VertexId};
use crate::types::Point;
use indexmap::IndexMap;
use tracing::trace;

/// 顶点表
#[derive(Debug, Default, Clone)]
pub struct VertexTable {
    /// 顶点槽位，`None` 表示空闲
    slots: Vec<Option<Vertex>>,
    /// 空闲槽位
    free: Vec<VertexId>,
    /// 坐标到顶点 ID 的映射（遍历顺序）
    index: IndexMap<Point, VertexId>,
}

impl VertexTable {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 顶点数量
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// 槽位数量（ID 上界）
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 通过坐标查找顶点 ID
    pub fn lookup(&self, point: &Point) -> Option<VertexId> {
        self.index.get(point).copied()
    }

    /// 获取顶点
    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// 通过坐标获取顶点
    pub fn get_by_point(&self, point: &Point) -> Option<&Vertex> {
        self.lookup(point).and_then(|id| self.get(id))
    }

    pub(crate) fn get_by_point_mut(&mut self, point: &Point) -> Option<&mut Vertex> {
        let id = self.lookup(point)?;
        self.get_mut(id)
    }

    /// 查找或创建顶点，返回 (ID, 是否新建)
    pub(crate) fn get_or_insert(&mut self, point: Point) -> (VertexId, bool) {
        if let Some(id) = self.lookup(&point) {
            return (id, false);
        }

        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(Vertex::new(id, point));
                id
            }
            None => {
                let id = VertexId::new(self.slots.len());
                self.slots.push(Some(Vertex::new(id, point)));
                id
            }
        };
        self.index.insert(point, id);
        trace!(%point, slot = id.index(), "顶点入表");

        (id, true)
    }

    /// 按坐标删除顶点，不存在时为空操作
    pub(crate) fn remove(&mut self, point: &Point) -> Option<Vertex> {
        // shift_remove 保持其余顶点的相对顺序
        let id = self.index.shift_remove(point)?;
        let vertex = self.slots.get_mut(id.index()).and_then(Option::take);
        if vertex.is_some() {
            self.free.push(id);
            trace!(%point, slot = id.index(), "顶点出表");
        }
        vertex
    }

    /// 清空
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
    }

    /// 按表顺序遍历顶点 ID
    pub fn ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.index.values().copied()
    }

    /// 按表顺序遍历顶点
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.ids().filter_map(move |id| self.get(id))
    }

    /// 按表顺序遍历坐标
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.index.keys().copied()
    }
}
