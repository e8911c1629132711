//! PointGraph CLI 工具
//!
//! 交互式命令行界面

use anyhow::Context;
use clap::Parser;
use pointgraph::cli::{execute_line, CommandCompleter, CommandResult, Printer};
use pointgraph::graph::Graph;
use pointgraph::import::{EdgeListImporter, ImportFormat};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pointgraph-cli")]
#[command(about = "PointGraph 命令行工具")]
#[command(version)]
struct Args {
    /// 启动时导入的边列表文件
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 导入文件格式（csv / jsonl），默认按扩展名推断
    #[arg(short, long)]
    format: Option<String>,

    /// 执行单个命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,

    /// 关闭彩色输出
    #[arg(long)]
    no_color: bool,

    /// 历史记录文件
    #[arg(long)]
    history: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let printer = Printer::new(!args.no_color);
    let mut graph = Graph::new();

    if let Some(path) = &args.input {
        let format = match &args.format {
            Some(name) => ImportFormat::parse(name)?,
            None => ImportFormat::from_path(path),
        };
        let stats = EdgeListImporter::new(&mut graph)
            .import_file(path, format)
            .with_context(|| format!("无法导入 {}", path.display()))?;
        println!("{}", printer.format_import(&stats));
    }

    // 单个命令模式
    if let Some(command) = &args.execute {
        print_result(&printer, execute_line(command, &mut graph, &printer));
        return Ok(());
    }

    println!("PointGraph CLI v{}", pointgraph::VERSION);
    println!("输入 'help' 查看命令列表，'quit' 退出\n");

    let mut rl: Editor<CommandCompleter, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CommandCompleter::new()));

    let history = args
        .history
        .or_else(|| dirs::home_dir().map(|home| home.join(".pointgraph_history")));
    if let Some(path) = &history {
        // 首次运行时历史文件不存在
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("pointgraph> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str())?;
                }
                match execute_line(&line, &mut graph, &printer) {
                    CommandResult::Exit => break,
                    result => print_result(&printer, result),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Err(e) = rl.save_history(path) {
            tracing::warn!(error = %e, "无法保存历史记录");
        }
    }

    graph.free();
    println!("再见！");
    Ok(())
}

fn print_result(printer: &Printer, result: CommandResult) {
    match result {
        CommandResult::Message(msg) if !msg.is_empty() => println!("{}", msg),
        CommandResult::Error(msg) => eprintln!("{}", printer.error(&msg)),
        _ => {}
    }
}
