//! Stress majorization by stochastic pairwise corrections.
//!
//! Each sweep visits every vertex pair once, round by round, and moves both endpoints
//! halfway towards their target distance, damped by the pair weight and a step size
//! that decays exponentially across sweeps.

use crate::algo::StressOptions;
use crate::algo::distance::DistanceMatrix;
use crate::algo::rng::XorShift64Star;
use crate::error::{Error, Result};
use crate::graph::Point;
use nalgebra::DMatrix;
use std::collections::BTreeMap;

mod rounds;

pub use rounds::pair_rounds;

/// Final vertex coordinates, indexed like the rows of the distance matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Coordinates {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, i: usize) -> Point {
        Point {
            x: self.x[i],
            y: self.y[i],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| Point { x, y })
    }

    fn from_layout(layout: &DMatrix<f64>) -> Self {
        Self {
            x: layout.column(0).iter().copied().collect(),
            y: layout.column(1).iter().copied().collect(),
        }
    }
}

/// Places every vertex so that Euclidean distances approximate `matrix`.
///
/// Vertices in `pins` are held at their given position throughout; every other vertex
/// starts at a seeded random position and is refined over `opts.iterations` sweeps.
pub fn vertex_coordinates(
    matrix: &DistanceMatrix,
    pins: &BTreeMap<usize, Point>,
    opts: &StressOptions,
) -> Result<Coordinates> {
    opts.validate()?;
    let n = matrix.len();
    for (&index, p) in pins {
        if index >= n {
            return Err(Error::PinIndexOutOfRange { index, len: n });
        }
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(Error::NonFinitePin { index });
        }
    }

    match n {
        0 => return Ok(Coordinates::default()),
        1 => {
            let p = pins.get(&0).copied().unwrap_or(Point { x: 0.0, y: 0.0 });
            return Ok(Coordinates {
                x: vec![p.x],
                y: vec![p.y],
            });
        }
        _ => {}
    }

    let timing_enabled = std::env::var("TAPIR_TIMING").ok().as_deref() == Some("1");
    let start = timing_enabled.then(std::time::Instant::now);

    let d = matrix.as_matrix();
    let mut rng = XorShift64Star::new(opts.random_seed);
    let mut layout = initial_layout(n, opts.initial_diameter, &mut rng);
    if !pins.is_empty() {
        let (sx, sy) = pinned_shift(d, pins);
        for mut row in layout.row_iter_mut() {
            row[0] += sx;
            row[1] += sy;
        }
        apply_pins(&mut layout, pins);
    }

    let weights = d.map(|v| v.powf(opts.weight_exponent));
    let (min_w, max_w) = upper_weight_bounds(&weights);
    let maxstep = 1.0 / min_w;
    let minstep = 1.0 / max_w;
    let lambda = if opts.iterations > 1 {
        (minstep / maxstep).ln() / (opts.iterations - 1) as f64
    } else {
        0.0
    };

    let rounds = pair_rounds(n);
    for iteration in 0..opts.iterations {
        let step = maxstep * (lambda * iteration as f64).exp();
        tracing::trace!(iteration, step, "stress sweep");
        let order = rng.permutation(n);
        for round in &rounds {
            for &(a, b) in round {
                let (v1, v2) = (order[a], order[b]);
                let mu = (weights[(v1, v2)] * step).min(1.0);
                correct_pair(&mut layout, v1, v2, d[(v1, v2)], mu);
            }
            apply_pins(&mut layout, pins);
        }
    }

    tracing::debug!(
        vertices = n,
        pinned = pins.len(),
        iterations = opts.iterations,
        maxstep,
        minstep,
        "computed vertex coordinates"
    );
    if let Some(s) = start {
        tracing::info!(elapsed = ?s.elapsed(), vertices = n, "tapir stress timing");
    }

    Ok(Coordinates::from_layout(&layout))
}

/// Uniform random positions in a square of side `diameter` centred on the origin.
fn initial_layout(n: usize, diameter: f64, rng: &mut XorShift64Star) -> DMatrix<f64> {
    let mut layout = DMatrix::<f64>::zeros(n, 2);
    for i in 0..n {
        layout[(i, 0)] = rng.next_f64_unit() * diameter - diameter / 2.0;
        layout[(i, 1)] = rng.next_f64_unit() * diameter - diameter / 2.0;
    }
    layout
}

/// Offset for the random start layout, taken from the column means of the distance
/// submatrix between pinned vertices. With a single pin both axes use the same mean.
fn pinned_shift(d: &DMatrix<f64>, pins: &BTreeMap<usize, Point>) -> (f64, f64) {
    let idx: Vec<usize> = pins.keys().copied().collect();
    let k = idx.len() as f64;
    let col_mean = |c: usize| idx.iter().map(|&r| d[(r, c)]).sum::<f64>() / k;
    let sx = col_mean(idx[0]);
    let sy = idx.get(1).map_or(sx, |&c| col_mean(c));
    (sx, sy)
}

fn apply_pins(layout: &mut DMatrix<f64>, pins: &BTreeMap<usize, Point>) {
    for (&i, p) in pins {
        layout[(i, 0)] = p.x;
        layout[(i, 1)] = p.y;
    }
}

/// Smallest and largest weight over pairs `i < j`.
fn upper_weight_bounds(weights: &DMatrix<f64>) -> (f64, f64) {
    let n = weights.nrows();
    let mut min_w = f64::INFINITY;
    let mut max_w = f64::NEG_INFINITY;
    for i in 0..n {
        for j in (i + 1)..n {
            let w = weights[(i, j)];
            min_w = min_w.min(w);
            max_w = max_w.max(w);
        }
    }
    (min_w, max_w)
}

/// Moves `v1` and `v2` symmetrically so that their distance closes `mu` of half the
/// gap to `target`.
fn correct_pair(layout: &mut DMatrix<f64>, v1: usize, v2: usize, target: f64, mu: f64) {
    let dx = layout[(v1, 0)] - layout[(v2, 0)];
    let dy = layout[(v1, 1)] - layout[(v2, 1)];
    let dist = dx.hypot(dy);
    // Coincident vertices have no direction; separate them along +x.
    let (ux, uy) = if dist > 0.0 {
        (dx / dist, dy / dist)
    } else {
        (1.0, 0.0)
    };
    let r = (target - dist) / 2.0 * mu;
    layout[(v1, 0)] += r * ux;
    layout[(v1, 1)] += r * uy;
    layout[(v2, 0)] -= r * ux;
    layout[(v2, 1)] -= r * uy;
}
