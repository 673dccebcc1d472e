use tapir::{
    DEFAULT_SPREAD, Error, Graph, LayoutOptions, LayoutResult, Point, StressOptions, layout,
    ring_layout,
};

fn dist(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

fn chain(ids: &[&str]) -> Graph {
    let mut g = Graph::new();
    for id in ids {
        g.add_node(*id);
    }
    for w in ids.windows(2) {
        g.add_edge(format!("{}-{}", w[0], w[1]), w[0], w[1]);
    }
    g
}

#[test]
fn empty_graph_has_nothing_to_draw() {
    assert!(
        layout(&Graph::new(), &LayoutOptions::default())
            .unwrap()
            .is_none()
    );
}

#[test]
fn positions_are_keyed_by_node_id() {
    let g = chain(&["a", "b", "c"]);
    let opts = LayoutOptions {
        spread: 10.0,
        ..Default::default()
    };
    let res = layout(&g, &opts).unwrap().expect("layout");
    assert_eq!(
        res.positions.keys().collect::<Vec<_>>(),
        vec!["a", "b", "c"]
    );
    let ab = dist(res.positions["a"], res.positions["b"]);
    let ac = dist(res.positions["a"], res.positions["c"]);
    assert!((ab - 10.0).abs() < 2.0, "ab = {ab}");
    assert!((ac - 20.0).abs() < 4.0, "ac = {ac}");
}

#[test]
fn single_node_is_placed_at_origin() {
    let g = chain(&["only"]);
    let res = layout(&g, &LayoutOptions::default()).unwrap().expect("layout");
    assert_eq!(res.positions["only"], Point { x: 0.0, y: 0.0 });
}

#[test]
fn pinned_nodes_keep_their_position() {
    let mut g = chain(&["a", "b", "c", "d"]);
    g.nodes[0].pin(100.0, 50.0);
    g.nodes[3].pin(130.0, 50.0);
    let opts = LayoutOptions {
        spread: 10.0,
        ..Default::default()
    };
    let res = layout(&g, &opts).unwrap().expect("layout");
    assert_eq!(res.positions["a"], Point { x: 100.0, y: 50.0 });
    assert_eq!(res.positions["d"], Point { x: 130.0, y: 50.0 });
}

#[test]
fn edge_with_unknown_endpoint_is_rejected() {
    let mut g = chain(&["a", "b"]);
    g.add_edge("bad", "a", "zzz");
    let err = layout(&g, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingEndpoint { edge_id } if edge_id == "bad"));
}

#[test]
fn duplicate_node_id_is_rejected() {
    let mut g = chain(&["a", "b"]);
    g.add_node("a");
    let err = g.validate().unwrap_err();
    assert!(matches!(err, Error::DuplicateNode { node_id } if node_id == "a"));
}

#[test]
fn invalid_spread_surfaces_from_layout() {
    let g = chain(&["a", "b"]);
    let opts = LayoutOptions {
        spread: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        layout(&g, &opts).unwrap_err(),
        Error::InvalidSpread { .. }
    ));
}

#[test]
fn relationship_becomes_a_member_cycle() {
    let mut g = chain(&["a", "b", "c"]);
    g.edges.clear();
    assert_eq!(g.add_relationship("r", &["a", "b", "c"]), 3);
    let hops: Vec<(&str, &str)> = g
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(hops, vec![("a", "b"), ("b", "c"), ("c", "a")]);
    assert_eq!(g.edges[0].id, "r#0");
}

#[test]
fn relationship_hops_through_unknown_members_are_skipped() {
    let mut g = chain(&["a", "b"]);
    g.edges.clear();
    assert_eq!(g.add_relationship("r", &["a", "ghost", "b"]), 1);
    assert_eq!(g.edges[0].source, "b");
    assert_eq!(g.edges[0].target, "a");
    g.validate().unwrap();
}

#[test]
fn two_member_relationship_is_a_double_edge() {
    let mut g = chain(&["a", "b"]);
    g.edges.clear();
    assert_eq!(g.add_relationship("r", &["a", "b"]), 2);
    let opts = LayoutOptions {
        spread: 4.0,
        ..Default::default()
    };
    let res = layout(&g, &opts).unwrap().expect("layout");
    let ab = dist(res.positions["a"], res.positions["b"]);
    assert!((ab - 4.0).abs() < 1e-6, "ab = {ab}");
}

#[test]
fn pin_from_previous_layout_keeps_existing_nodes_still() {
    let opts = LayoutOptions {
        spread: 10.0,
        ..Default::default()
    };
    let before = layout(&chain(&["a", "b"]), &opts)
        .unwrap()
        .expect("layout");

    let mut g = chain(&["a", "b", "c"]);
    g.nodes[1].pin(0.0, 0.0);
    assert_eq!(g.pin_from(&before), 1);

    let after = layout(&g, &opts).unwrap().expect("layout");
    assert_eq!(after.positions["a"], before.positions["a"]);
    assert_eq!(after.positions["b"], Point { x: 0.0, y: 0.0 });
}

#[test]
fn pin_from_empty_result_pins_nothing() {
    let mut g = chain(&["a"]);
    assert_eq!(g.pin_from(&LayoutResult::default()), 0);
    assert!(g.nodes[0].pinned.is_none());
}

#[test]
fn ring_layout_places_members_on_a_cycle() {
    let pts = ring_layout(&["a", "b", "c", "d"], 8.0, &StressOptions::default()).unwrap();
    assert_eq!(pts.len(), 4);
    for i in 0..4 {
        let d = dist(pts[i], pts[(i + 1) % 4]);
        assert!((d - 8.0).abs() < 8.0 * 0.25, "hop {i}: {d}");
    }
    assert!(ring_layout(&[], 8.0, &StressOptions::default()).unwrap().is_empty());
}

#[test]
fn extent_derives_spread() {
    assert_eq!(LayoutOptions::for_extent(10.0).spread, 30.0);
    assert_eq!(LayoutOptions::default().spread, DEFAULT_SPREAD);
}

#[test]
fn options_deserialize_from_partial_json() {
    let opts: LayoutOptions =
        serde_json::from_str(r#"{ "spread": 12.5, "iterations": 25 }"#).unwrap();
    assert_eq!(opts.spread, 12.5);
    assert_eq!(opts.stress.iterations, 25);
    assert_eq!(opts.stress.weight_exponent, -2.0);
    assert_eq!(opts.stress.initial_diameter, 1000.0);

    let opts: LayoutOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts.spread, DEFAULT_SPREAD);
    assert_eq!(opts.stress.iterations, 10);
}
