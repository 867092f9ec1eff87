use std::collections::{BTreeSet, HashSet};

use graph_engine_core::{breadth_first, depth_first, widest_path, Capacity, Graph};
use proptest::prelude::*;

const MAX_NODES: usize = 7;

fn name(i: usize) -> String {
    format!("v{}", i)
}

fn build(n: usize, edges: &[(usize, usize, u8)]) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_node(name(i));
    }
    for &(s, t, w) in edges {
        g.add_edge(name(s % n), name(t % n), w as f64);
    }
    g
}

fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, u8)>)> {
    (1..=MAX_NODES).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec((0..n, 0..n, 0u8..10), 0..16),
        )
    })
}

/// Nodes reachable from `start`, by fixpoint over the edge list.
fn component(n: usize, edges: &[(usize, usize, u8)], start: usize) -> BTreeSet<String> {
    let mut reached: HashSet<usize> = HashSet::from([start]);
    loop {
        let before = reached.len();
        for &(s, t, _) in edges {
            let (s, t) = (s % n, t % n);
            if reached.contains(&s) || reached.contains(&t) {
                reached.insert(s);
                reached.insert(t);
            }
        }
        if reached.len() == before {
            break;
        }
    }
    reached.into_iter().map(name).collect()
}

/// Best bottleneck over all simple paths, by exhaustive search.
fn brute_force_bottleneck(n: usize, edges: &[(usize, usize, u8)], src: usize, dest: usize) -> f64 {
    fn walk(
        n: usize,
        edges: &[(usize, usize, u8)],
        at: usize,
        dest: usize,
        bottleneck: f64,
        on_path: &mut Vec<bool>,
        best: &mut f64,
    ) {
        if at == dest {
            *best = best.max(bottleneck);
            return;
        }
        for &(s, t, w) in edges {
            let (s, t) = (s % n, t % n);
            let next = if s == at {
                t
            } else if t == at {
                s
            } else {
                continue;
            };
            if on_path[next] {
                continue;
            }
            on_path[next] = true;
            walk(n, edges, next, dest, bottleneck.min(w as f64), on_path, best);
            on_path[next] = false;
        }
    }

    let mut best = 0.0;
    let mut on_path = vec![false; n];
    on_path[src] = true;
    walk(n, edges, src, dest, f64::INFINITY, &mut on_path, &mut best);
    best
}

proptest! {
    #[test]
    fn test_traversals_cover_exactly_the_component((n, edges) in arb_graph(), start in 0..MAX_NODES) {
        let start = start % n;
        let g = build(n, &edges);
        let expected = component(n, &edges, start);

        for order in [
            breadth_first(&g, &name(start), None).unwrap(),
            depth_first(&g, &name(start), None).unwrap(),
        ] {
            prop_assert_eq!(&order[0], &name(start));
            let unique: BTreeSet<String> = order.iter().cloned().collect();
            prop_assert_eq!(unique.len(), order.len(), "duplicate entries in {:?}", order);
            prop_assert_eq!(&unique, &expected);
        }
    }

    #[test]
    fn test_operations_are_deterministic((n, edges) in arb_graph(), a in 0..MAX_NODES, b in 0..MAX_NODES) {
        let (a, b) = (name(a % n), name(b % n));
        let g = build(n, &edges);
        prop_assert_eq!(breadth_first(&g, &a, None), breadth_first(&g, &a, None));
        prop_assert_eq!(depth_first(&g, &a, None), depth_first(&g, &a, None));
        prop_assert_eq!(widest_path(&g, &a, &b, None), widest_path(&g, &a, &b, None));
    }

    #[test]
    fn test_widest_capacity_matches_brute_force((n, edges) in arb_graph(), a in 0..MAX_NODES, b in 0..MAX_NODES) {
        let (a, b) = (a % n, b % n);
        let g = build(n, &edges);
        let result = widest_path(&g, &name(a), &name(b), None).unwrap();

        if a == b {
            prop_assert_eq!(result.capacity, Capacity::Unbounded);
            prop_assert_eq!(result.path, vec![name(a)]);
            prop_assert!(result.edges.is_empty());
        } else {
            let expected = brute_force_bottleneck(n, &edges, a, b);
            prop_assert_eq!(result.capacity, Capacity::Finite(expected));
            if expected == 0.0 {
                prop_assert!(result.path.is_empty());
                prop_assert!(result.edges.is_empty());
            }
        }
    }

    #[test]
    fn test_widest_path_is_consistent((n, edges) in arb_graph(), a in 0..MAX_NODES, b in 0..MAX_NODES) {
        let (a, b) = (a % n, b % n);
        let g = build(n, &edges);
        let result = widest_path(&g, &name(a), &name(b), None).unwrap();
        if !result.is_reachable() {
            return Ok(());
        }

        prop_assert_eq!(result.path.first(), Some(&name(a)));
        prop_assert_eq!(result.path.last(), Some(&name(b)));
        prop_assert_eq!(result.edges.len(), result.path.len() - 1);

        let distinct: HashSet<&String> = result.path.iter().collect();
        prop_assert_eq!(distinct.len(), result.path.len());

        for (i, e) in result.edges.iter().enumerate() {
            prop_assert_eq!(&e.from, &result.path[i]);
            prop_assert_eq!(&e.to, &result.path[i + 1]);
            // Some stored edge between the pair must be at least as wide as
            // the reported bottleneck.
            let widest_link = g
                .edges()
                .iter()
                .filter(|x| {
                    (x.source == e.from && x.target == e.to)
                        || (x.source == e.to && x.target == e.from)
                })
                .map(|x| x.weight)
                .fold(0.0, f64::max);
            prop_assert!(Capacity::Finite(widest_link) >= result.capacity);
        }
    }
}
