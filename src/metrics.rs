//! 性能指标收集模块
//!
//! 统计图变更与查询次数，支持快照和 Prometheus 文本格式导出

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 指标收集器
#[derive(Debug)]
pub struct Metrics {
    /// 查询统计
    query_stats: QueryStats,
    /// 图变更统计
    graph_stats: GraphStats,
    /// 创建时间
    start_time: Instant,
}

/// 查询统计
#[derive(Debug, Default)]
struct QueryStats {
    /// 总查询数
    total_queries: AtomicU64,
    /// 查询总耗时（微秒）
    total_duration_us: AtomicU64,
    /// 松弛扫描次数（每个连通分量一次）
    relaxation_sweeps: AtomicU64,
}

/// 图变更统计
#[derive(Debug, Default)]
struct GraphStats {
    /// 边插入数
    edges_inserted: AtomicU64,
    /// 重复插入数
    duplicate_inserts: AtomicU64,
    /// 边删除数
    edges_deleted: AtomicU64,
    /// 被拒绝的删除数（边不存在）
    rejected_deletes: AtomicU64,
    /// 顶点创建数
    vertices_created: AtomicU64,
    /// 顶点移除数（度降为 0）
    vertices_removed: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // 查询指标
    pub total_queries: u64,
    pub avg_query_duration_ms: f64,
    pub relaxation_sweeps: u64,

    // 图变更指标
    pub edges_inserted: u64,
    pub duplicate_inserts: u64,
    pub edges_deleted: u64,
    pub rejected_deletes: u64,
    pub vertices_created: u64,
    pub vertices_removed: u64,

    // 系统指标
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            query_stats: QueryStats::default(),
            graph_stats: GraphStats::default(),
            start_time: Instant::now(),
        }
    }

    /// 记录查询开始
    pub fn record_query_start(&self) -> QueryTimer {
        self.query_stats.total_queries.fetch_add(1, Ordering::Relaxed);
        QueryTimer::new()
    }

    /// 记录查询完成
    pub fn record_query_complete(&self, timer: QueryTimer) {
        let duration = timer.elapsed();
        self.query_stats
            .total_duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// 记录一次松弛扫描
    pub fn record_relaxation_sweep(&self) {
        self.query_stats
            .relaxation_sweeps
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录边插入
    pub fn record_edge_insert(&self) {
        self.graph_stats.edges_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录重复插入
    pub fn record_duplicate_insert(&self) {
        self.graph_stats
            .duplicate_inserts
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录边删除
    pub fn record_edge_delete(&self) {
        self.graph_stats.edges_deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录被拒绝的删除
    pub fn record_rejected_delete(&self) {
        self.graph_stats
            .rejected_deletes
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录顶点创建
    pub fn record_vertex_create(&self) {
        self.graph_stats
            .vertices_created
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录顶点移除
    pub fn record_vertex_remove(&self) {
        self.graph_stats
            .vertices_removed
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_queries = self.query_stats.total_queries.load(Ordering::Relaxed);
        let total_duration_us = self.query_stats.total_duration_us.load(Ordering::Relaxed);

        let avg_query_duration_ms = if total_queries > 0 {
            (total_duration_us as f64) / (total_queries as f64) / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            total_queries,
            avg_query_duration_ms,
            relaxation_sweeps: self.query_stats.relaxation_sweeps.load(Ordering::Relaxed),
            edges_inserted: self.graph_stats.edges_inserted.load(Ordering::Relaxed),
            duplicate_inserts: self.graph_stats.duplicate_inserts.load(Ordering::Relaxed),
            edges_deleted: self.graph_stats.edges_deleted.load(Ordering::Relaxed),
            rejected_deletes: self.graph_stats.rejected_deletes.load(Ordering::Relaxed),
            vertices_created: self.graph_stats.vertices_created.load(Ordering::Relaxed),
            vertices_removed: self.graph_stats.vertices_removed.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();

        let counters: [(&str, &str, u64); 9] = [
            ("queries_total", "Total number of graph queries", snapshot.total_queries),
            (
                "relaxation_sweeps_total",
                "Number of relaxation sweeps",
                snapshot.relaxation_sweeps,
            ),
            ("edges_inserted_total", "Total edges inserted", snapshot.edges_inserted),
            (
                "duplicate_inserts_total",
                "Inserts of edges that already existed",
                snapshot.duplicate_inserts,
            ),
            ("edges_deleted_total", "Total edges deleted", snapshot.edges_deleted),
            (
                "rejected_deletes_total",
                "Deletes of edges that did not exist",
                snapshot.rejected_deletes,
            ),
            ("vertices_created_total", "Total vertices created", snapshot.vertices_created),
            (
                "vertices_removed_total",
                "Vertices removed after their last edge was deleted",
                snapshot.vertices_removed,
            ),
            ("uptime_seconds", "Seconds since metrics creation", snapshot.uptime_seconds),
        ];

        let mut content = String::new();
        for (name, help, value) in counters {
            content.push_str(&format!("# HELP pointgraph_{} {}\n", name, help));
            content.push_str(&format!("# TYPE pointgraph_{} counter\n", name));
            content.push_str(&format!("pointgraph_{} {}\n", name, value));
        }

        content.push_str("# HELP pointgraph_query_duration_avg_ms Average query duration in milliseconds\n");
        content.push_str("# TYPE pointgraph_query_duration_avg_ms gauge\n");
        content.push_str(&format!(
            "pointgraph_query_duration_avg_ms {:.3}\n",
            snapshot.avg_query_duration_ms
        ));

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.query_stats.total_queries.store(0, Ordering::Relaxed);
        self.query_stats.total_duration_us.store(0, Ordering::Relaxed);
        self.query_stats.relaxation_sweeps.store(0, Ordering::Relaxed);

        self.graph_stats.edges_inserted.store(0, Ordering::Relaxed);
        self.graph_stats.duplicate_inserts.store(0, Ordering::Relaxed);
        self.graph_stats.edges_deleted.store(0, Ordering::Relaxed);
        self.graph_stats.rejected_deletes.store(0, Ordering::Relaxed);
        self.graph_stats.vertices_created.store(0, Ordering::Relaxed);
        self.graph_stats.vertices_removed.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 查询计时器
pub struct QueryTimer {
    start: Instant,
}

impl QueryTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        let timer = metrics.record_query_start();
        std::thread::sleep(Duration::from_millis(5));
        metrics.record_query_complete(timer);

        metrics.record_edge_insert();
        metrics.record_edge_insert();
        metrics.record_duplicate_insert();
        metrics.record_vertex_create();
        metrics.record_relaxation_sweep();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_queries, 1);
        assert!(snapshot.avg_query_duration_ms >= 5.0);
        assert_eq!(snapshot.edges_inserted, 2);
        assert_eq!(snapshot.duplicate_inserts, 1);
        assert_eq!(snapshot.vertices_created, 1);
        assert_eq!(snapshot.relaxation_sweeps, 1);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        metrics.record_query_start();
        metrics.record_edge_delete();

        let prom = metrics.to_prometheus();
        assert!(prom.content.contains("pointgraph_queries_total 1"));
        assert!(prom.content.contains("pointgraph_edges_deleted_total 1"));
        assert!(prom.content.contains("# TYPE pointgraph_query_duration_avg_ms gauge"));
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_edge_insert();
        metrics.record_rejected_delete();
        metrics.reset();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.edges_inserted, 0);
        assert_eq!(snapshot.rejected_deletes, 0);
    }
}
