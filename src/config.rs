//! Run parameters for one animation.
//!
//! [`SimulationConfig`] bundles the scalar inputs of a run (frame rate,
//! duration, oscillator count, coupling strength) together with the
//! [`UnmatchedPolicy`] that decides how lights outside every band are lit.

use alloc::format;

use crate::error::{SimulationError, SimulationResult};

// ─── UnmatchedPolicy ────────────────────────────────────────────────────────

/// Colour given to a light whose height falls in no band.
///
/// Band membership is strict on both edges, so a light sitting exactly on a
/// band boundary, or at the top of the tree, belongs to no band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnmatchedPolicy {
    /// Render the light as `(0, 0, 0)`.
    #[default]
    Black,
    /// Colour the light from the band closest to its height.
    NearestBand,
    /// Repeat the colour of the most recent matched light in the same frame,
    /// or black if no earlier light matched. Matches output of the legacy
    /// Grasshopper script.
    CarryOver,
}

// ─── SimulationConfig ───────────────────────────────────────────────────────

/// Parameters of a single batch run.
///
/// `fps * duration` frames are produced. Zero frames is legal and yields a
/// header-only table; zero oscillators is rejected by [`validate`].
///
/// [`validate`]: SimulationConfig::validate
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Frames per second of the target animation.
    pub fps: u32,
    /// Length of the animation in seconds.
    pub duration: u32,
    /// Number of coupled oscillators, one per horizontal band.
    pub oscillators: usize,
    /// Coupling strength `k`. May be negative, zero or positive.
    pub coupling: f64,
    /// Colour for lights that match no band.
    pub unmatched: UnmatchedPolicy,
}

impl SimulationConfig {
    /// Construct a config with the default [`UnmatchedPolicy`].
    pub fn new(fps: u32, duration: u32, oscillators: usize, coupling: f64) -> Self {
        Self {
            fps,
            duration,
            oscillators,
            coupling,
            unmatched: UnmatchedPolicy::default(),
        }
    }

    /// Replace the unmatched-light policy.
    pub fn with_unmatched(mut self, unmatched: UnmatchedPolicy) -> Self {
        self.unmatched = unmatched;
        self
    }

    /// Number of frames in the run: `fps * duration`.
    ///
    /// Fails if the product does not fit in a `u32`.
    pub fn frame_count(&self) -> SimulationResult<u32> {
        self.fps.checked_mul(self.duration).ok_or_else(|| {
            SimulationError::invalid_configuration(format!(
                "frame count {} fps x {} s overflows u32",
                self.fps, self.duration
            ))
        })
    }

    /// Check every precondition of a run.
    pub fn validate(&self) -> SimulationResult<()> {
        if self.oscillators == 0 {
            return Err(SimulationError::invalid_configuration(
                "oscillator count must be at least 1",
            ));
        }
        if !self.coupling.is_finite() {
            return Err(SimulationError::invalid_configuration(format!(
                "coupling strength must be finite, got {}",
                self.coupling
            )));
        }
        self.frame_count()?;
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(30, 10, 4, 0.1)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
