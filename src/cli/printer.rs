//! 结果打印器
//!
//! 路径、连通分量和统计信息用表格输出，状态消息按需着色

use crate::algorithm::{Component, PathResult};
use crate::graph::Edge;
use crate::import::ImportStats;
use crate::types::Point;
use colored::Colorize;
use prettytable::{format, row, Table};

/// 结果打印器
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn success(&self, msg: &str) -> String {
        if self.color {
            msg.green().to_string()
        } else {
            msg.to_string()
        }
    }

    pub fn notice(&self, msg: &str) -> String {
        if self.color {
            msg.yellow().to_string()
        } else {
            msg.to_string()
        }
    }

    pub fn error(&self, msg: &str) -> String {
        if self.color {
            format!("{} {}", "错误:".red().bold(), msg)
        } else {
            format!("错误: {}", msg)
        }
    }

    /// 点列表，空格分隔
    pub fn format_points(&self, points: &[Point]) -> String {
        points
            .iter()
            .map(Point::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 边列表，空格分隔
    pub fn format_edges(&self, edges: &[Edge]) -> String {
        edges
            .iter()
            .map(Edge::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 最短路径：点序列、逐步累计距离和汇总
    pub fn format_path(&self, path: Option<&PathResult>) -> String {
        let Some(path) = path else {
            return self.notice("未找到路径");
        };

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Step", "Point", "Distance"]);

        let mut cumulative = 0.0;
        let mut previous: Option<Point> = None;
        for (step, point) in path.vertices.iter().enumerate() {
            if let Some(prev) = previous {
                cumulative += prev.distance_to(point);
            }
            table.add_row(row![step, point, format!("{:.3}", cumulative)]);
            previous = Some(*point);
        }

        format!(
            "{}\n{}{} 跳, 总长度 {:.3}\n",
            self.format_points(&path.vertices),
            table,
            path.length,
            path.total_weight
        )
    }

    /// 连通分量汇总
    pub fn format_components(&self, components: &[Component]) -> String {
        if components.is_empty() {
            return self.notice("图为空");
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["#", "Root", "Vertices", "Edges", "Weight"]);
        for (i, component) in components.iter().enumerate() {
            table.add_row(row![
                i + 1,
                component.root,
                component.vertices.len(),
                component.edges.len(),
                format!("{:.3}", component.total_weight)
            ]);
        }

        let mut output = table.to_string();
        for (i, component) in components.iter().enumerate() {
            output.push_str(&format!(
                "[{}] {}\n",
                i + 1,
                self.format_edges(&component.edges)
            ));
        }
        output
    }

    /// 图统计信息
    pub fn format_stats(&self, vertex_count: usize, edge_count: usize, components: usize) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", vertex_count]);
        table.add_row(row!["Edge Count", edge_count]);
        table.add_row(row!["Components", components]);
        table.to_string()
    }

    /// 导入结果
    pub fn format_import(&self, stats: &ImportStats) -> String {
        self.success(&format!(
            "导入完成: 插入 {} 条, 重复 {} 条, 错误 {} 条 ({} ms)",
            stats.inserted, stats.duplicates, stats.errors, stats.duration_ms
        ))
    }

    /// 帮助信息
    pub fn help_text() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   PointGraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

坐标可写作 `x y`、`x,y` 或 `(x,y)`

图操作:
  insert, add <x1 y1 x2 y2>   插入无向边
                              示例: insert 0 0 3 4
  delete, del <x1 y1 x2 y2>   删除边，孤立端点随之移除
                              示例: delete (0,0) (3,4)
  load <文件>                 从 CSV / JSON Lines 导入边
  reset                       清空图

查询:
  reach <x y>                 从某点可达的所有顶点
  path <x1 y1 x2 y2>          两点间最短路径（欧氏长度）
  show                        按连通分量展示全部边
  edges                       单行输出全部边

其他:
  stats, info                 图统计信息
  metrics                     Prometheus 格式的指标
  help, h, ?                  显示帮助
  quit, exit, q               退出程序
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_format_points_and_edges() {
        let printer = Printer::new(false);
        assert_eq!(printer.format_points(&[]), "");
        assert_eq!(printer.format_points(&[p(0, 0), p(-1, 2)]), "(0,0) (-1,2)");
        assert_eq!(
            printer.format_edges(&[Edge::new(p(0, 0), p(3, 4))]),
            "(0,0),(3,4)"
        );
    }

    #[test]
    fn test_format_path() {
        let printer = Printer::new(false);
        let path = PathResult {
            vertices: vec![p(0, 0), p(3, 4), p(6, 8)],
            length: 2,
            total_weight: 10.0,
        };

        let output = printer.format_path(Some(&path));
        assert!(output.starts_with("(0,0) (3,4) (6,8)\n"));
        assert!(output.contains("5.000"));
        assert!(output.contains("2 跳, 总长度 10.000"));

        assert_eq!(printer.format_path(None), "未找到路径");
    }

    #[test]
    fn test_plain_messages() {
        let printer = Printer::new(false);
        assert_eq!(printer.success("ok"), "ok");
        assert_eq!(printer.error("boom"), "错误: boom");
    }

    #[test]
    fn test_format_stats() {
        let output = Printer::new(false).format_stats(7, 9, 2);
        assert!(output.contains("Vertex Count"));
        assert!(output.contains("Components"));
    }
}
