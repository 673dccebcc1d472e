#![forbid(unsafe_code)]

//! Headless stress-majorization graph layout.
//!
//! Vertices are placed so that their Euclidean distances approximate shortest-path
//! distances in the graph, with every edge asking for the same length (the *spread*).
//! Some vertices may be pinned ("heavy"); the optimizer never moves them.
//!
//! The index-based building blocks are [`shortest_path_matrix`] and
//! [`vertex_coordinates`]; [`layout`] wraps both for graphs keyed by string ids.

pub mod algo;
pub mod error;
pub mod graph;

use std::collections::BTreeMap;

pub use algo::distance::{DistanceMatrix, shortest_path_matrix};
pub use algo::stress::{Coordinates, pair_rounds, vertex_coordinates};
pub use algo::{DEFAULT_EXTENT, DEFAULT_SPREAD, LayoutOptions, StressOptions};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, LayoutResult, Node, Point};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless layout entry point.
///
/// Returns `Ok(None)` for a graph without nodes: there is nothing to draw.
pub fn layout(graph: &Graph, opts: &LayoutOptions) -> Result<Option<LayoutResult>> {
    let (src_ind_list, dst_ind_list) = graph.edge_index_lists()?;
    let Some(d) =
        shortest_path_matrix(graph.nodes.len(), &src_ind_list, &dst_ind_list, opts.spread)?
    else {
        return Ok(None);
    };

    let pins: BTreeMap<usize, Point> = graph
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(i, n)| n.pinned.map(|p| (i, p)))
        .collect();
    let coords = vertex_coordinates(&d, &pins, &opts.stress)?;

    let positions = graph
        .nodes
        .iter()
        .zip(coords.iter())
        .map(|(n, p)| (n.id.clone(), p))
        .collect();
    Ok(Some(LayoutResult { positions }))
}

/// Lays out `members` as a closed ring, the shape used to preview a relationship
/// before its members are placed in the main graph.
///
/// Returns one point per member, in member order; empty for no members.
pub fn ring_layout(members: &[&str], spread: f64, opts: &StressOptions) -> Result<Vec<Point>> {
    let n = members.len();
    let src_ind_list: Vec<usize> = (0..n).collect();
    let dst_ind_list: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
    let Some(d) = shortest_path_matrix(n, &src_ind_list, &dst_ind_list, spread)? else {
        return Ok(Vec::new());
    };
    let coords = vertex_coordinates(&d, &BTreeMap::new(), opts)?;
    Ok(coords.iter().collect())
}
