//! PointGraph 演示脚本
//!
//! 构建两个连通分量的样例图，展示、删除边并执行路径查询

use pointgraph::cli::Printer;
use pointgraph::{ComponentWalker, Graph, PathFinder, Point};
use tracing_subscriber::EnvFilter;

const SAMPLE_EDGES: &[((i32, i32), (i32, i32))] = &[
    // 第一个连通分量
    ((0, 0), (0, 10)),
    ((0, 0), (5, 6)),
    ((0, 10), (10, 10)),
    ((0, 10), (5, 6)),
    ((0, 0), (5, 4)),
    ((5, 4), (10, 4)),
    ((5, 6), (10, 6)),
    ((10, 10), (10, 6)),
    ((10, 6), (10, 4)),
    // 第二个连通分量
    ((20, 4), (20, 10)),
    ((20, 10), (30, 10)),
    ((25, 5), (30, 10)),
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let printer = Printer::new(false);

    println!("PointGraph 演示");
    println!("================\n");

    let mut graph = Graph::new();
    println!("1. 插入样例边...");
    for &(a, b) in SAMPLE_EDGES {
        if !graph.insert_edge(a.into(), b.into())? {
            println!("edge exists");
        }
    }
    println!(
        "   当前图大小: {} 顶点, {} 边\n",
        graph.vertex_count(),
        graph.edge_count()
    );

    println!("2. 展示图:");
    println!("{}", printer.format_edges(&graph.show_graph()));
    println!("{}", printer.format_components(&ComponentWalker::new(&graph).components()));

    let origin = Point::new(0, 0);
    println!("3. 最短路径 (0,0) -> (10,6):");
    let path = PathFinder::new(&graph).shortest_path(origin, Point::new(10, 6));
    println!("{}", printer.format_path(path.as_ref()));

    println!("4. 删除边 (0,0)-(5,6)");
    graph.delete_edge(origin, Point::new(5, 6))?;
    println!("{}\n", printer.format_edges(&graph.show_graph()));

    let finder = PathFinder::new(&graph);
    println!("5. 最短路径 (0,0) -> (10,6):");
    println!(
        "{}",
        printer.format_path(finder.shortest_path(origin, Point::new(10, 6)).as_ref())
    );
    println!("6. 最短路径 (0,0) -> (25,5):");
    println!(
        "{}\n",
        printer.format_path(finder.shortest_path(origin, Point::new(25, 5)).as_ref())
    );

    for source in [origin, Point::new(20, 4)] {
        println!(
            "从 {} 可达: {}",
            source,
            printer.format_points(&finder.reachable_vertices(source))
        );
    }

    println!("\n{}", graph.metrics().to_prometheus().content);

    graph.free();
    Ok(())
}
