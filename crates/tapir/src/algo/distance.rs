//! Shortest-path target distances.

use crate::error::{Error, Result};
use nalgebra::DMatrix;
use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};

/// Unreachable pairs are placed this many spreads apart.
const FAR_FACTOR: f64 = 3.0;
/// Zero distances (the diagonal) become `spread * NEAR_FACTOR`.
const NEAR_FACTOR: f64 = 1e-6;

/// Square, symmetric matrix of strictly positive, finite target distances.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix(DMatrix<f64>);

impl DistanceMatrix {
    /// Wraps caller-provided targets after checking the matrix invariants.
    pub fn new(matrix: DMatrix<f64>) -> Result<Self> {
        let (rows, cols) = matrix.shape();
        if rows != cols {
            return Err(Error::NonSquareMatrix { rows, cols });
        }
        for row in 0..rows {
            for col in 0..cols {
                let value = matrix[(row, col)];
                if !(value.is_finite() && value > 0.0) {
                    return Err(Error::InvalidDistance { row, col, value });
                }
                if col > row && value != matrix[(col, row)] {
                    return Err(Error::AsymmetricMatrix { row, col });
                }
            }
        }
        Ok(Self(matrix))
    }

    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.0.nrows() == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0[(i, j)]
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.0
    }

    pub fn into_inner(self) -> DMatrix<f64> {
        self.0
    }

    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.len())
            .map(|i| self.0.row(i).iter().copied().collect())
            .collect()
    }
}

/// Builds the all-pairs shortest-path matrix for `n` vertices joined by the edges
/// `(src_ind_list[k], dst_ind_list[k])`, each of length `spread`.
///
/// Returns `Ok(None)` when there are no vertices. Unreachable pairs get
/// `3 * spread`, and zero distances (the diagonal) get `spread * 1e-6`, so every
/// entry is finite and strictly positive. A spread so large that the longest path
/// overflows, or so small that the near sentinel underflows, is rejected.
pub fn shortest_path_matrix(
    n: usize,
    src_ind_list: &[usize],
    dst_ind_list: &[usize],
    spread: f64,
) -> Result<Option<DistanceMatrix>> {
    if src_ind_list.len() != dst_ind_list.len() {
        return Err(Error::EdgeListLengthMismatch {
            src: src_ind_list.len(),
            dst: dst_ind_list.len(),
        });
    }
    // The longest possible path has `n - 1` hops; it and the far sentinel must stay
    // finite, and the near sentinel must not underflow to zero.
    let longest = (n.saturating_sub(1) as f64).max(FAR_FACTOR);
    if !(spread.is_finite()
        && spread > 0.0
        && (spread * longest).is_finite()
        && spread * NEAR_FACTOR > 0.0)
    {
        return Err(Error::InvalidSpread { spread });
    }
    for (edge, (&src, &dst)) in src_ind_list.iter().zip(dst_ind_list).enumerate() {
        for index in [src, dst] {
            if index >= n {
                return Err(Error::EdgeIndexOutOfRange {
                    edge,
                    index,
                    len: n,
                });
            }
        }
    }
    if n == 0 {
        return Ok(None);
    }

    let mut g: UnGraph<(), f64> = UnGraph::with_capacity(n, src_ind_list.len());
    for _ in 0..n {
        g.add_node(());
    }
    for (&src, &dst) in src_ind_list.iter().zip(dst_ind_list) {
        g.add_edge(NodeIndex::new(src), NodeIndex::new(dst), spread);
    }

    let far = spread * FAR_FACTOR;
    let near = spread * NEAR_FACTOR;
    let mut d = DMatrix::<f64>::from_element(n, n, far);
    for i in 0..n {
        let costs = dijkstra(&g, NodeIndex::new(i), None, |e| *e.weight());
        for (v, cost) in costs {
            let j = v.index();
            if j < i {
                continue;
            }
            d[(i, j)] = if cost == 0.0 { near } else { cost };
        }
        for j in 0..i {
            d[(i, j)] = d[(j, i)];
        }
    }

    tracing::debug!(
        vertices = n,
        edges = src_ind_list.len(),
        spread,
        "built shortest-path matrix"
    );
    Ok(Some(DistanceMatrix(d)))
}
