//! 数据导入模块
//!
//! 从 CSV 或 JSON Lines 批量导入边列表

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::Point;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportStats {
    /// 新插入的边
    pub inserted: usize,
    /// 已存在而未插入的边
    pub duplicates: usize,
    /// 无法解析或被拒绝的记录
    pub errors: usize,
    pub duration_ms: u64,
}

/// 输入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    JsonLines,
}

impl ImportFormat {
    /// 根据扩展名推断格式，未知扩展名按 CSV 处理
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("jsonl") | Some("json") | Some("ndjson") => ImportFormat::JsonLines,
            _ => ImportFormat::Csv,
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Ok(ImportFormat::Csv),
            "jsonl" | "json" | "ndjson" => Ok(ImportFormat::JsonLines),
            other => Err(Error::ParseError(format!("不支持的格式: {}", other))),
        }
    }
}

/// CSV 必需的列
const EDGE_COLUMNS: [&str; 4] = ["x1", "y1", "x2", "y2"];

/// 边记录（CSV 表头 / JSON 字段: x1,y1,x2,y2）
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl EdgeRecord {
    pub fn endpoints(&self) -> (Point, Point) {
        (Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }
}

/// 边列表导入器
pub struct EdgeListImporter<'g> {
    graph: &'g mut Graph,
    batch_size: usize,
}

impl<'g> EdgeListImporter<'g> {
    /// 创建导入器
    pub fn new(graph: &'g mut Graph) -> Self {
        Self {
            graph,
            batch_size: 10000,
        }
    }

    /// 设置批次大小（每批输出一次进度日志）
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// 按格式导入文件
    pub fn import_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: ImportFormat,
    ) -> Result<ImportStats> {
        match format {
            ImportFormat::Csv => self.import_csv(path),
            ImportFormat::JsonLines => self.import_jsonl(path),
        }
    }

    /// 从 CSV 导入
    pub fn import_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let start = Instant::now();
        let file = File::open(path.as_ref())?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| Error::ImportError(format!("无法读取 CSV 表头: {}", e)))?;
        if let Some(missing) = EDGE_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|h| h == **column))
        {
            return Err(Error::ImportError(format!("CSV 表头缺少列: {}", missing)));
        }

        let mut stats = ImportStats::default();
        for (line, record) in reader.deserialize::<EdgeRecord>().enumerate() {
            match record {
                Ok(record) => self.apply(&record, &mut stats),
                Err(e) if e.is_io_error() => {
                    return Err(Error::ImportError(format!("读取 CSV 失败: {}", e)));
                }
                Err(e) => {
                    warn!(line = line + 2, error = %e, "跳过无法解析的 CSV 记录");
                    stats.errors += 1;
                }
            }
            self.report_progress(line + 1, &stats);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(path = %path.as_ref().display(), ?stats, "CSV 导入完成");
        Ok(stats)
    }

    /// 从 JSON Lines 导入
    pub fn import_jsonl<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let start = Instant::now();
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        // 按原始字节切行，非 UTF-8 的行与其他坏记录一样计数跳过
        let mut stats = ImportStats::default();
        for (line_no, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match serde_json::from_slice::<EdgeRecord>(&line) {
                Ok(record) => self.apply(&record, &mut stats),
                Err(e) => {
                    warn!(line = line_no + 1, error = %e, "跳过无法解析的 JSON 记录");
                    stats.errors += 1;
                }
            }
            self.report_progress(line_no + 1, &stats);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(path = %path.as_ref().display(), ?stats, "JSON Lines 导入完成");
        Ok(stats)
    }

    /// 插入单条记录并更新统计
    fn apply(&mut self, record: &EdgeRecord, stats: &mut ImportStats) {
        let (p1, p2) = record.endpoints();
        match self.graph.insert_edge(p1, p2) {
            Ok(true) => stats.inserted += 1,
            Ok(false) => stats.duplicates += 1,
            Err(e) => {
                warn!(error = %e, "跳过被拒绝的边");
                stats.errors += 1;
            }
        }
    }

    fn report_progress(&self, processed: usize, stats: &ImportStats) {
        if processed % self.batch_size == 0 {
            debug!(processed, inserted = stats.inserted, "导入进度");
        }
    }
}

/// 从文件导入，格式按扩展名推断
pub fn import_edges<P: AsRef<Path>>(graph: &mut Graph, path: P) -> Result<ImportStats> {
    let format = ImportFormat::from_path(&path);
    EdgeListImporter::new(graph).import_file(path, format)
}
