//! Light positions and the vertical extent of the tree.
//!
//! Positions are supplied once per run by whatever tool measured or modelled
//! the tree. A light's index in the input slice is its identity: it fixes the
//! column order of the output table.

use crate::error::{SimulationError, SimulationResult};

/// Position of one addressable light in the tree's coordinate space.
///
/// `z` is height; `y` drives the horizontal colour wave; `x` is carried for
/// completeness but does not influence the animation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Light {
    /// Horizontal coordinate (unused by the colour curve).
    pub x: f64,
    /// Horizontal coordinate feeding the colour wave.
    pub y: f64,
    /// Height.
    pub z: f64,
}

impl Light {
    /// Construct a light at `(x, y, z)`.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// `true` if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Light {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64, f64)> for Light {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

/// Reject any light with a NaN or infinite coordinate.
///
/// The error names the first offending index.
pub fn check_finite(lights: &[Light]) -> SimulationResult<()> {
    match lights.iter().position(|l| !l.is_finite()) {
        Some(index) => Err(SimulationError::non_finite_light(index)),
        None => Ok(()),
    }
}

/// Lowest and highest light heights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalExtent {
    /// Height of the lowest light.
    pub min_z: f64,
    /// Height of the highest light.
    pub max_z: f64,
}

impl VerticalExtent {
    /// Scan `lights` for the lowest and highest `z`.
    ///
    /// Returns `None` for an empty slice.
    pub fn of(lights: &[Light]) -> Option<Self> {
        let first = lights.first()?;
        let init = Self {
            min_z: first.z,
            max_z: first.z,
        };
        Some(lights.iter().fold(init, |acc, l| Self {
            min_z: acc.min_z.min(l.z),
            max_z: acc.max_z.max(l.z),
        }))
    }

    /// Tree height: `max_z - min_z`.
    pub fn height(&self) -> f64 {
        self.max_z - self.min_z
    }
}
