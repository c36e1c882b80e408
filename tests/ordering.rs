//! Behavioral tests for dependency ordering through the public API.

use std::cmp::Ordering;
use std::collections::HashMap;

use deporder::graph::{GraphError, GraphView, Orderer};
use petgraph::graph::DiGraph;

type Deps = HashMap<&'static str, Vec<&'static str>>;

fn deps(edges: &[(&'static str, &[&'static str])]) -> Deps {
    edges.iter().map(|(n, d)| (*n, d.to_vec())).collect()
}

fn view(nodes: &[&'static str], deps: &Deps) -> GraphView<&'static str> {
    GraphView::new(nodes.iter().copied(), |node| {
        deps.get(node).cloned().unwrap_or_default()
    })
    .unwrap()
}

/// Deterministic xorshift generator so shuffles are reproducible.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = (self.next() % (i as u64 + 1)) as usize;
            items.swap(i, j);
        }
    }
}

#[test]
fn test_acyclic_graph_has_no_witness() {
    let d = deps(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[]), ("d", &["a"])]);
    let orderer = Orderer::new(view(&["a", "b", "c", "d"], &d));

    assert!(orderer.is_acyclic());
    assert!(orderer.cycle_witness().is_none());
    assert!(orderer.circular_dependency().is_none());
    assert!(orderer.cyclic_components().is_empty());
}

#[test]
fn test_mutual_dependency_witness() {
    let d = deps(&[("A", &["B"]), ("B", &["A"])]);
    let orderer = Orderer::new(view(&["A", "B"], &d));

    assert!(!orderer.is_acyclic());
    let witness = orderer.cycle_witness().unwrap();
    assert_eq!(witness.len(), 2);
    assert!(witness.contains(&"A"));
    assert!(witness.contains(&"B"));
    for (i, node) in witness.iter().enumerate() {
        let next = witness[(i + 1) % witness.len()];
        assert!(d[node].contains(&next));
    }
}

#[test]
fn test_dependencies_sort_before_dependents() {
    let d = deps(&[
        ("A", &[]),
        ("B", &[]),
        ("C", &["A", "B"]),
        ("D", &["A", "C"]),
        ("E", &["C"]),
        ("F", &["B"]),
    ]);
    let orderer = Orderer::new(view(&["A", "B", "C", "D", "E", "F"], &d));
    let cmp = orderer.comparator();

    assert!(orderer.is_acyclic());
    assert_eq!(cmp.compare(&"A", &"C"), Ordering::Less);
    assert_eq!(cmp.compare(&"B", &"C"), Ordering::Less);
    assert_eq!(cmp.compare(&"A", &"D"), Ordering::Less);
    assert_eq!(cmp.compare(&"C", &"D"), Ordering::Less);
    assert_eq!(cmp.compare(&"C", &"E"), Ordering::Less);
    assert_eq!(cmp.compare(&"B", &"F"), Ordering::Less);
}

#[test]
fn test_every_edge_respected_regardless_of_enumeration() {
    let d = deps(&[
        ("app", &["http", "db", "log"]),
        ("http", &["log", "tls"]),
        ("db", &["log", "pool"]),
        ("pool", &["log"]),
        ("tls", &[]),
        ("log", &[]),
    ]);
    let mut nodes = vec!["app", "http", "db", "pool", "tls", "log"];
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);

    for _ in 0..20 {
        rng.shuffle(&mut nodes);
        let orderer = Orderer::new(view(&nodes, &d));
        let cmp = orderer.comparator();
        for (node, node_deps) in &d {
            for dep in node_deps {
                assert!(cmp.is_before(dep, node), "{dep} must precede {node}");
            }
        }
    }
}

#[test]
fn test_long_cyclic_chain_is_stack_safe() {
    const LEN: usize = 10_000;
    let view = GraphView::new(0..LEN, |&i| {
        if i == 0 {
            vec![LEN - 1]
        } else {
            vec![i - 1]
        }
    })
    .unwrap();

    let orderer = Orderer::new(view);

    assert!(!orderer.is_acyclic());
    assert_eq!(orderer.component_count(), 1);
    assert_eq!(orderer.cycle_witness().unwrap().len(), LEN);

    let cmp = orderer.comparator();
    let mut nodes: Vec<usize> = (0..LEN).collect();
    cmp.sort(&mut nodes);
    assert_eq!(nodes, orderer.sorted_nodes());
    assert_ne!(cmp.compare(&0, &(LEN - 1)), Ordering::Equal);
}

#[test]
fn test_long_acyclic_chain_orders_leaf_first() {
    // The first enumerated node sits at the top of the chain, so the
    // traversal has to go the full depth from the first root.
    const LEN: usize = 50_000;
    let view = GraphView::new(0..LEN, |&i| if i + 1 < LEN { vec![i + 1] } else { vec![] })
        .unwrap();
    let orderer = Orderer::new(view);

    assert!(orderer.is_acyclic());
    assert_eq!(orderer.sorted_nodes(), (0..LEN).rev().collect::<Vec<_>>());
}

#[test]
fn test_anchored_order_ignores_enumeration() {
    // Two disjoint 2-node cycles, tied together by the anchor.
    let d = deps(&[
        ("root", &["a1", "b1"]),
        ("a1", &["a2", "shared"]),
        ("a2", &["a1"]),
        ("b1", &["b2"]),
        ("b2", &["b1", "shared"]),
        ("shared", &[]),
    ]);
    let mut nodes = vec!["shared", "b2", "a2", "root", "b1", "a1"];
    let mut rng = XorShift(42);

    let mut expected: Option<Vec<&str>> = None;
    for _ in 0..25 {
        rng.shuffle(&mut nodes);
        let orderer = Orderer::with_anchor(view(&nodes, &d), &"root").unwrap();
        let cmp = orderer.anchored_comparator().unwrap();

        let mut sorted = vec!["a1", "a2", "b1", "b2", "root", "shared"];
        sorted.sort_by(cmp.as_fn());

        let first = expected.get_or_insert_with(|| sorted.clone());
        assert_eq!(&sorted, first);
    }

    let expected = expected.unwrap();
    assert_eq!(expected.first(), Some(&"shared"));
    assert_eq!(expected.last(), Some(&"root"));
}

#[test]
fn test_unanchored_order_follows_enumeration() {
    let d = deps(&[("x", &[]), ("y", &[])]);
    let forward = Orderer::new(view(&["x", "y"], &d)).sorted_nodes();
    let backward = Orderer::new(view(&["y", "x"], &d)).sorted_nodes();

    assert_eq!(forward, vec!["x", "y"]);
    assert_eq!(backward, vec!["y", "x"]);
}

#[test]
fn test_sorting_twice_is_stable() {
    let d = deps(&[
        ("a", &["b"]),
        ("b", &["c", "a"]),
        ("c", &[]),
        ("d", &["d"]),
        ("e", &["a", "d"]),
    ]);
    let orderer = Orderer::new(view(&["e", "d", "c", "b", "a"], &d));
    let cmp = orderer.comparator();

    let mut first = vec!["a", "b", "c", "d", "e"];
    cmp.sort(&mut first);
    let mut second = first.clone();
    second.reverse();
    cmp.sort(&mut second);

    assert_eq!(first, second);
    assert_eq!(first, orderer.sorted_nodes());
}

#[test]
fn test_missing_anchor_is_reported() {
    let d = deps(&[("a", &[])]);
    let err = Orderer::with_anchor(view(&["a"], &d), &"nope").unwrap_err();
    assert_eq!(
        err,
        GraphError::UnknownNode {
            node: "\"nope\"".to_string()
        }
    );
}

#[test]
fn test_dangling_dependency_is_reported() {
    let result = GraphView::new(["a"], |_| vec!["b"]);
    assert!(matches!(result, Err(GraphError::DanglingEdge { .. })));
}

#[test]
fn test_components_match_petgraph() {
    let edges: &[(usize, usize)] = &[
        (0, 1),
        (1, 2),
        (2, 0),
        (2, 3),
        (3, 4),
        (4, 5),
        (5, 3),
        (6, 5),
        (6, 7),
        (7, 6),
        (8, 8),
    ];
    let mut g = DiGraph::<usize, ()>::new();
    let idx: Vec<_> = (0..10).map(|i| g.add_node(i)).collect();
    for &(from, to) in edges {
        g.add_edge(idx[from], idx[to], ());
    }

    let orderer = Orderer::new(GraphView::from_digraph(&g).unwrap());

    let mut ours: Vec<Vec<usize>> = orderer
        .components()
        .map(|mut c| {
            c.sort_unstable();
            c
        })
        .collect();
    let mut theirs: Vec<Vec<usize>> = petgraph::algo::tarjan_scc(&g)
        .into_iter()
        .map(|c| {
            let mut c: Vec<usize> = c.into_iter().map(|n| g[n]).collect();
            c.sort_unstable();
            c
        })
        .collect();
    ours.sort();
    theirs.sort();

    assert_eq!(ours, theirs);
    assert_eq!(orderer.cyclic_components().len(), 4);
}

#[test]
fn test_ordering_is_shareable_across_threads() {
    let d = deps(&[("a", &["b"]), ("b", &[])]);
    let orderer = Orderer::new(view(&["a", "b"], &d));

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let cmp = orderer.comparator();
                assert!(cmp.is_before(&"b", &"a"));
            });
        }
    });
}
