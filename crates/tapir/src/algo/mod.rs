pub mod distance;
mod rng;
pub mod stress;

use serde::{Deserialize, Serialize};

/// Size of a drawn vertex in the object graph viewer (six 72-pt glyphs).
pub const DEFAULT_EXTENT: f64 = 432.0;

/// Target length of a single edge, three extents apart.
pub const DEFAULT_SPREAD: f64 = 3.0 * DEFAULT_EXTENT;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StressOptions {
    /// Number of full sweeps over all vertex pairs.
    pub iterations: usize,
    /// Exponent applied to target distances to get pair weights. Negative values let
    /// close pairs dominate the adjustment.
    pub weight_exponent: f64,
    /// Side of the square the random start layout is drawn from.
    pub initial_diameter: f64,
    /// Seed for the start layout and per-sweep vertex orders. The same seed and input
    /// always produce the same coordinates.
    pub random_seed: u64,
}

impl Default for StressOptions {
    fn default() -> Self {
        Self {
            iterations: 10,
            weight_exponent: -2.0,
            initial_diameter: 1000.0,
            random_seed: 0,
        }
    }
}

impl StressOptions {
    pub(crate) fn validate(&self) -> crate::Result<()> {
        if !self.weight_exponent.is_finite() {
            return Err(crate::Error::InvalidOption {
                name: "weight_exponent",
                value: self.weight_exponent,
            });
        }
        if !(self.initial_diameter.is_finite() && self.initial_diameter >= 0.0) {
            return Err(crate::Error::InvalidOption {
                name: "initial_diameter",
                value: self.initial_diameter,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Target distance between two directly connected vertices.
    pub spread: f64,
    #[serde(flatten)]
    pub stress: StressOptions,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            spread: DEFAULT_SPREAD,
            stress: StressOptions::default(),
        }
    }
}

impl LayoutOptions {
    /// Options for vertices drawn with the given extent; connected vertices end up three
    /// extents apart.
    pub fn for_extent(extent: f64) -> Self {
        Self {
            spread: 3.0 * extent,
            ..Default::default()
        }
    }
}
