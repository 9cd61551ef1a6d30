use itertools::Itertools;
use wgraphs::{algo::*, io::*, prelude::*};

fn undirected(edges: &[(&'static str, &'static str, Weight)]) -> GraphStore<&'static str> {
    GraphStore::from_weighted_edges(Direction::Undirected, edges.iter().copied()).unwrap()
}

fn directed(edges: &[(&'static str, &'static str, Weight)]) -> GraphStore<&'static str> {
    GraphStore::from_weighted_edges(Direction::Directed, edges.iter().copied()).unwrap()
}

/// Normalized endpoint pairs of a forest, sorted
fn forest_edges(forest: &SpanningForest<&'static str>) -> Vec<(&'static str, &'static str)> {
    forest
        .edges
        .iter()
        .map(|e| {
            if e.source <= e.target {
                (e.source, e.target)
            } else {
                (e.target, e.source)
            }
        })
        .sorted()
        .collect()
}

#[test]
fn minimum_spanning_tree_of_small_graph() {
    let g = undirected(&[
        ("A", "B", 1.0),
        ("A", "C", 5.0),
        ("B", "C", 4.0),
        ("B", "D", 2.0),
        ("C", "D", 6.0),
        ("D", "E", 3.0),
    ]);
    let expected = vec![("A", "B"), ("B", "C"), ("B", "D"), ("D", "E")];

    let kruskal = g.kruskal().unwrap();
    assert_eq!(kruskal.total_weight, 10.0);
    assert!(kruskal.spanning);
    assert_eq!(forest_edges(&kruskal), expected);

    let prim = g.prim().unwrap();
    assert_eq!(prim.total_weight, 10.0);
    assert!(prim.spanning);
    assert_eq!(forest_edges(&prim), expected);
}

#[test]
fn bellman_ford_with_negative_edge() {
    let g = directed(&[
        ("A", "B", 1.0),
        ("B", "C", -3.0),
        ("B", "D", 2.0),
        ("D", "C", 1.0),
    ]);

    let paths = g.bellman_ford(&"A").unwrap();
    for (v, d) in [("A", 0.0), ("B", 1.0), ("C", -2.0), ("D", 3.0)] {
        assert_eq!(paths.distance_to(&v), Some(d), "distance to {v}");
    }
    assert_eq!(paths.path_to(&"C"), Some(vec!["A", "B", "C"]));

    assert!(matches!(
        g.dijkstra(&"A"),
        Err(GraphError::NegativeWeightNotAllowed { .. })
    ));
}

#[test]
fn edmonds_karp_flow_network() {
    let mut g = GraphStore::directed();
    for (u, v, c) in [
        ("s", "a", 10.0),
        ("s", "b", 5.0),
        ("a", "b", 15.0),
        ("a", "t", 10.0),
        ("b", "a", 4.0),
        ("b", "t", 10.0),
    ] {
        g.add_capacity_edge(u, v, c).unwrap();
    }

    let flow = g.max_flow(&"s", &"t").unwrap();
    assert_eq!(flow.value, 15.0);
    assert_eq!(flow.cut_capacity(), 15.0);
    assert!(flow.is_on_source_side(&"s"));
    assert!(!flow.is_on_source_side(&"t"));
}

#[test]
fn hopcroft_karp_perfect_matching() {
    let mut g = GraphStore::undirected();
    for (u, v) in [
        ("A", "X"),
        ("A", "Y"),
        ("B", "Y"),
        ("B", "Z"),
        ("C", "X"),
        ("C", "Z"),
    ] {
        g.add_unit_edge(u, v).unwrap();
    }

    let matching = g.hopcroft_karp(&["A", "B", "C"], &["X", "Y", "Z"]).unwrap();
    assert_eq!(matching.size(), 3);
    for (l, r) in matching.pairs() {
        assert!(g.contains_edge(l, r));
        assert_eq!(matching.partner_of(r), Some(l));
    }
    assert_eq!(g.maximum_matching().unwrap().size(), 3);
}

#[test]
fn disconnected_graph_yields_spanning_forest() {
    let g = undirected(&[("A", "B", 2.0), ("C", "D", 3.0)]);

    for forest in [g.kruskal().unwrap(), g.prim().unwrap()] {
        assert!(!forest.spanning);
        assert_eq!(forest.total_weight, 5.0);
        assert_eq!(forest_edges(&forest), vec![("A", "B"), ("C", "D")]);
        assert_eq!(forest.number_of_trees(g.number_of_nodes()), 2);
    }
    assert!(!is_connected(&g));
}

#[test]
fn edge_list_feeds_algorithms() {
    let input = "\
# flow network
s,a,1,10
s,b,1,5
a,b,1,15
a,t,1,10
b,a,1,4
b,t,1,10
";
    let g: GraphStore<String> = GraphStore::try_read_edge_list(input.as_bytes()).unwrap();
    let (s, t) = ("s".to_string(), "t".to_string());

    assert_eq!(g.max_flow(&s, &t).unwrap().value, 15.0);
    assert_eq!(bfs(&g, &s).unwrap().distance.get(&t), Some(&2));
}
