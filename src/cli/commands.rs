//! 命令解析与执行
//!
//! 每行输入解析为一个 [`Command`]，再作用在图上

use std::path::PathBuf;

use crate::algorithm::{ComponentWalker, PathFinder};
use crate::cli::printer::Printer;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::import::import_edges;
use crate::types::Point;

/// 命令执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 控制台命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert(Point, Point),
    Delete(Point, Point),
    Reach(Point),
    Path(Point, Point),
    Show,
    Edges,
    Stats,
    Metrics,
    Load(PathBuf),
    Reset,
    Help,
    Quit,
}

/// 命令名（补全用）
pub const COMMAND_NAMES: &[&str] = &[
    "insert", "add", "delete", "del", "reach", "path", "show", "edges", "stats", "metrics",
    "load", "reset", "help", "quit", "exit",
];

impl Command {
    /// 解析一行输入
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (cmd, args) = match input.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd, args.trim()),
            None => (input, ""),
        };

        let command = match cmd.to_lowercase().as_str() {
            "insert" | "add" | "i" => {
                let (p1, p2) = parse_two_points(args, "insert x1 y1 x2 y2")?;
                Command::Insert(p1, p2)
            }
            "delete" | "del" | "d" => {
                let (p1, p2) = parse_two_points(args, "delete x1 y1 x2 y2")?;
                Command::Delete(p1, p2)
            }
            "reach" | "reachable" | "r" => Command::Reach(parse_one_point(args, "reach x y")?),
            "path" | "shortest" | "p" => {
                let (p1, p2) = parse_two_points(args, "path x1 y1 x2 y2")?;
                Command::Path(p1, p2)
            }
            "show" | "s" => Command::Show,
            "edges" | "e" => Command::Edges,
            "stats" | "info" => Command::Stats,
            "metrics" => Command::Metrics,
            "load" | "import" => {
                if args.is_empty() {
                    return Err(Error::ParseError("用法: load <文件>".to_string()));
                }
                Command::Load(PathBuf::from(args))
            }
            "reset" | "clear" => Command::Reset,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(Error::ParseError(format!(
                    "未知命令: {}。输入 'help' 查看帮助。",
                    other
                )))
            }
        };

        Ok(command)
    }

    /// 在图上执行命令
    pub fn execute(&self, graph: &mut Graph, printer: &Printer) -> CommandResult {
        match self {
            Command::Insert(p1, p2) => match graph.insert_edge(*p1, *p2) {
                Ok(true) => CommandResult::Message(printer.success(&format!(
                    "已插入边 {}-{}",
                    p1, p2
                ))),
                Ok(false) => CommandResult::Message(printer.notice("edge exists")),
                Err(e) => CommandResult::Error(e.to_string()),
            },

            Command::Delete(p1, p2) => match graph.delete_edge(*p1, *p2) {
                Ok(()) => CommandResult::Message(printer.success(&format!(
                    "已删除边 {}-{}",
                    p1, p2
                ))),
                Err(e) => CommandResult::Error(e.to_string()),
            },

            Command::Reach(source) => {
                let reachable = PathFinder::new(graph).reachable_vertices(*source);
                CommandResult::Message(printer.format_points(&reachable))
            }

            Command::Path(u, v) => {
                let path = PathFinder::new(graph).shortest_path(*u, *v);
                CommandResult::Message(printer.format_path(path.as_ref()))
            }

            Command::Show => {
                let components = ComponentWalker::new(graph).components();
                CommandResult::Message(printer.format_components(&components))
            }

            Command::Edges => CommandResult::Message(printer.format_edges(&graph.show_graph())),

            Command::Stats => {
                let components = ComponentWalker::new(graph).component_count();
                CommandResult::Message(printer.format_stats(
                    graph.vertex_count(),
                    graph.edge_count(),
                    components,
                ))
            }

            Command::Metrics => CommandResult::Message(graph.metrics().to_prometheus().content),

            Command::Load(path) => match import_edges(graph, path) {
                Ok(stats) => CommandResult::Message(printer.format_import(&stats)),
                Err(e) => CommandResult::Error(format!("导入失败: {}", e)),
            },

            Command::Reset => {
                graph.clear();
                CommandResult::Message(printer.success("图已清空"))
            }

            Command::Help => CommandResult::Message(Printer::help_text()),

            Command::Quit => CommandResult::Exit,
        }
    }
}

/// 解析并执行一行输入，空行返回 `Continue`
pub fn execute_line(input: &str, graph: &mut Graph, printer: &Printer) -> CommandResult {
    if input.trim().is_empty() {
        return CommandResult::Continue;
    }
    match Command::parse(input) {
        Ok(command) => command.execute(graph, printer),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// 把参数切成 `count` 个点，允许 `x y`、`x,y`、`(x,y)` 混写
fn parse_points(args: &str, count: usize, usage: &str) -> Result<Vec<Point>> {
    let tokens: Vec<&str> = args
        .split(|c: char| c == '(' || c == ')' || c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.len() != count * 2 {
        return Err(Error::ParseError(format!("用法: {}", usage)));
    }

    tokens
        .chunks(2)
        .map(|pair| pair.join(",").parse::<Point>())
        .collect()
}

fn parse_one_point(args: &str, usage: &str) -> Result<Point> {
    let points = parse_points(args, 1, usage)?;
    Ok(points[0])
}

fn parse_two_points(args: &str, usage: &str) -> Result<(Point, Point)> {
    let points = parse_points(args, 2, usage)?;
    Ok((points[0], points[1]))
}
