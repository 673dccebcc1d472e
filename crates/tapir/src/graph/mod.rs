use crate::error::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<String>) -> &mut Node {
        self.nodes.push(Node {
            id: id.into(),
            pinned: None,
        });
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }

    pub fn add_edge(
        &mut self,
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) {
        self.edges.push(Edge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        });
    }

    /// Adds a relationship between `members` as a closed cycle of edges
    /// (`m0 -> m1 -> ... -> m0`).
    ///
    /// Hops touching a member that is not a node of the graph are skipped; the
    /// remaining hops are still added. Returns the number of edges added.
    pub fn add_relationship(&mut self, id: &str, members: &[&str]) -> usize {
        let known: FxHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let mut hops: Vec<(String, String)> = Vec::new();
        for (i, src) in members.iter().enumerate() {
            let dst = members[(i + 1) % members.len()];
            if !known.contains(src) || !known.contains(dst) {
                continue;
            }
            hops.push((src.to_string(), dst.to_string()));
        }

        let added = hops.len();
        for (i, (src, dst)) in hops.into_iter().enumerate() {
            self.add_edge(format!("{id}#{i}"), src, dst);
        }
        added
    }

    /// Pins every node that already has a position in `previous`.
    ///
    /// Nodes with an explicit pin keep it.
    pub fn pin_from(&mut self, previous: &LayoutResult) -> usize {
        let mut pinned = 0;
        for node in &mut self.nodes {
            if node.pinned.is_some() {
                continue;
            }
            if let Some(p) = previous.positions.get(&node.id) {
                node.pinned = Some(*p);
                pinned += 1;
            }
        }
        pinned
    }

    pub fn validate(&self) -> Result<()> {
        self.index_map().map(|_| ())
    }

    /// Edge endpoints as dense node indices (node order), one entry per edge.
    pub fn edge_index_lists(&self) -> Result<(Vec<usize>, Vec<usize>)> {
        let index = self.index_map()?;
        let src = self.edges.iter().map(|e| index[e.source.as_str()]).collect();
        let dst = self.edges.iter().map(|e| index[e.target.as_str()]).collect();
        Ok((src, dst))
    }

    /// Maps node ids to dense indices in node order, rejecting duplicate ids
    /// and edges whose endpoints are not nodes.
    fn index_map(&self) -> Result<FxHashMap<&str, usize>> {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        index.reserve(self.nodes.len());
        for (idx, n) in self.nodes.iter().enumerate() {
            if index.insert(n.id.as_str(), idx).is_some() {
                return Err(Error::DuplicateNode {
                    node_id: n.id.clone(),
                });
            }
        }
        for e in &self.edges {
            if !index.contains_key(e.source.as_str()) || !index.contains_key(e.target.as_str()) {
                return Err(Error::MissingEndpoint {
                    edge_id: e.id.clone(),
                });
            }
        }
        Ok(index)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    /// Fixed ("heavy") position; the optimizer never moves a pinned node.
    pub pinned: Option<Point>,
}

impl Node {
    pub fn pin(&mut self, x: f64, y: f64) -> &mut Self {
        self.pinned = Some(Point { x, y });
        self
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutResult {
    pub positions: std::collections::BTreeMap<String, Point>,
}
