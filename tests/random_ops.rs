//! 随机插入/删除序列下的一致性测试

use pointgraph::{ComponentWalker, Error, Graph, Metrics, PathFinder, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

type Key = (Point, Point);

fn key(a: Point, b: Point) -> Key {
    (a.min(b), a.max(b))
}

fn random_point(rng: &mut StdRng) -> Point {
    Point::new(rng.gen_range(0..6), rng.gen_range(0..6))
}

fn model_vertices(model: &HashSet<Key>) -> HashSet<Point> {
    model.iter().flat_map(|&(a, b)| [a, b]).collect()
}

fn check_counts(graph: &Graph, model: &HashSet<Key>) {
    graph.validate().unwrap();
    assert_eq!(graph.edge_count(), model.len());
    assert_eq!(graph.vertex_count(), model_vertices(model).len());
}

fn check_queries(graph: &Graph, model: &HashSet<Key>, rng: &mut StdRng) {
    let vertices: Vec<Point> = graph.vertices();
    if vertices.is_empty() {
        return;
    }
    let source = vertices[rng.gen_range(0..vertices.len())];
    let finder = PathFinder::new(graph);

    let distances: HashMap<Point, f64> = finder.distances_from(source).into_iter().collect();
    assert_eq!(distances.get(&source), Some(&0.0));

    // 松弛不动点：边的两端要么都可达，要么都不可达
    for &(a, b) in model {
        let w = a.distance_to(&b);
        match (distances.get(&a), distances.get(&b)) {
            (Some(da), Some(db)) => {
                assert!(*db <= da + w + 1e-9);
                assert!(*da <= db + w + 1e-9);
            }
            (None, None) => {}
            other => panic!("edge {:?}-{:?} half reachable: {:?}", a, b, other),
        }
    }

    let mut reachable: HashSet<Point> = finder.reachable_vertices(source).into_iter().collect();
    assert!(!reachable.contains(&source));
    reachable.insert(source);
    assert_eq!(reachable, distances.keys().copied().collect());

    for &target in &vertices {
        match finder.shortest_path(source, target) {
            Some(path) => {
                assert_eq!(path.vertices.first(), Some(&source));
                assert_eq!(path.vertices.last(), Some(&target));
                for pair in path.vertices.windows(2) {
                    assert!(model.contains(&key(pair[0], pair[1])));
                }
                assert_eq!(Some(path.total_weight), finder.distance(source, target));
            }
            None => assert!(!distances.contains_key(&target)),
        }
    }

    let shown: HashSet<Key> = ComponentWalker::new(graph)
        .show_graph()
        .into_iter()
        .map(|e| key(e.p1(), e.p2()))
        .collect();
    assert_eq!(&shown, model);
    assert_eq!(graph.show_graph().len(), model.len());
}

fn run_sequence(seed: u64, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::with_metrics(Arc::new(Metrics::new()));
    let mut model: HashSet<Key> = HashSet::new();

    for step in 0..steps {
        let a = random_point(&mut rng);
        let b = random_point(&mut rng);

        if rng.gen_bool(0.6) {
            match graph.insert_edge(a, b) {
                Ok(inserted) => assert_eq!(inserted, model.insert(key(a, b))),
                Err(Error::DegenerateEdge(_)) => assert_eq!(a, b),
                Err(e) => panic!("unexpected insert error: {}", e),
            }
        } else {
            let before = (graph.vertex_count(), graph.edge_count());
            match graph.delete_edge(a, b) {
                Ok(()) => assert!(model.remove(&key(a, b))),
                Err(e) => {
                    assert!(e.is_not_found() || matches!(e, Error::DegenerateEdge(_)));
                    assert!(!model.contains(&key(a, b)));
                    assert_eq!(before, (graph.vertex_count(), graph.edge_count()));
                }
            }
        }

        check_counts(&graph, &model);
        if step % 10 == 0 {
            check_queries(&graph, &model, &mut rng);
        }
    }

    check_queries(&graph, &model, &mut rng);
}

#[test]
fn test_random_sequences() {
    for seed in [1, 7, 42, 2024] {
        run_sequence(seed, 300);
    }
}

#[test]
fn test_delete_everything() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut graph = Graph::with_metrics(Arc::new(Metrics::new()));
    let mut model: HashSet<Key> = HashSet::new();

    for _ in 0..150 {
        let a = random_point(&mut rng);
        let b = random_point(&mut rng);
        if a != b && graph.insert_edge(a, b).unwrap() {
            model.insert(key(a, b));
        }
    }

    let mut edges: Vec<Key> = model.iter().copied().collect();
    edges.sort();
    for (a, b) in edges {
        // 反向删除同样有效
        graph.delete_edge(b, a).unwrap();
        model.remove(&key(a, b));
        check_counts(&graph, &model);
    }

    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.show_graph().is_empty());
}
