/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Horizontal bands: which oscillator governs which light.
//!
//! The tree height `maxZ − minZ` is cut into one equal band per oscillator.
//! Band `j` spans `(amplitude·j, amplitude·(j+1))` with
//! `amplitude = height / oscillators`, measured from `z = 0`.
//!
//! # Invariants
//!
//! - Bands are contiguous: `band[j].upper == band[j + 1].lower` bit for bit,
//!   since both are computed as `amplitude · (j + 1)`.
//! - Membership is strict on both edges. A light exactly on a boundary, at
//!   the top of the last band, or outside `[0, height]` matches no band;
//!   [`UnmatchedPolicy`] decides its colour.
//!
//! [`UnmatchedPolicy`]: crate::config::UnmatchedPolicy

use alloc::format;
use alloc::vec::Vec;

use crate::error::{SimulationError, SimulationResult};
use crate::geometry::{Light, VerticalExtent};

/// Height interval governed by one oscillator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    /// Lower edge (exclusive).
    pub lower: f64,
    /// Upper edge (exclusive).
    pub upper: f64,
}

impl Band {
    /// `true` if `lower < z < upper`.
    pub fn contains(&self, z: f64) -> bool {
        self.lower < z && z < self.upper
    }

    /// Distance from `z` to the closed interval `[lower, upper]`.
    fn distance(&self, z: f64) -> f64 {
        if z < self.lower {
            self.lower - z
        } else if z > self.upper {
            z - self.upper
        } else {
            0.0
        }
    }
}

/// First band strictly containing `light_z`, or `None`.
pub fn classify(light_z: f64, bands: &[Band]) -> Option<usize> {
    bands.iter().position(|band| band.contains(light_z))
}

/// Band partition of one tree, built once per run.
#[derive(Clone, Debug, PartialEq)]
pub struct BandLayout {
    height: f64,
    amplitude: f64,
    bands: Vec<Band>,
}

impl BandLayout {
    /// Partition `height` into `oscillators` equal bands.
    ///
    /// `height` must be finite and non-negative.
    pub fn new(height: f64, oscillators: usize) -> SimulationResult<Self> {
        if oscillators == 0 {
            return Err(SimulationError::invalid_configuration(
                "oscillator count must be at least 1",
            ));
        }
        if !height.is_finite() || height < 0.0 {
            return Err(SimulationError::invalid_configuration(format!(
                "tree height must be finite and non-negative, got {height}"
            )));
        }
        let amplitude = height / oscillators as f64;
        let bands = (0..oscillators)
            .map(|j| Band {
                lower: amplitude * j as f64,
                upper: amplitude * (j + 1) as f64,
            })
            .collect();
        Ok(Self {
            height,
            amplitude,
            bands,
        })
    }

    /// Partition the vertical extent of `lights`. An empty tree has height 0.
    pub fn from_lights(lights: &[Light], oscillators: usize) -> SimulationResult<Self> {
        let height = VerticalExtent::of(lights).map_or(0.0, |e| e.height());
        Self::new(height, oscillators)
    }

    /// Tree height the layout was built from.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Height of each band.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Bands in ascending order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Number of bands (equal to the oscillator count).
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Always `false` for a successfully built layout.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Band governing a light at height `z`, if any.
    pub fn classify(&self, z: f64) -> Option<usize> {
        classify(z, &self.bands)
    }

    /// Band closest to height `z`; the lowest such band on ties.
    pub fn nearest(&self, z: f64) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (j, band) in self.bands.iter().enumerate() {
            let d = band.distance(z);
            if d < best_distance {
                best = j;
                best_distance = d;
            }
        }
        best
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn column(heights: &[f64]) -> Vec<Light> {
        heights.iter().map(|&z| Light::new(0.0, 0.0, z)).collect()
    }

    // ── Construction ──────────────────────────────────────────────────────

    #[test]
    fn test_zero_oscillators_rejected() {
        assert!(matches!(
            BandLayout::new(2.0, 0),
            Err(SimulationError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_invalid_height_rejected() {
        for height in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            assert!(
                matches!(
                    BandLayout::new(height, 2),
                    Err(SimulationError::InvalidConfiguration { .. })
                ),
                "height = {} should be rejected",
                height
            );
        }
        assert!(BandLayout::new(0.0, 2).is_ok());
    }

    #[test]
    fn test_overflowing_extent_rejected() {
        let lights = column(&[-f64::MAX, f64::MAX]);
        assert!(BandLayout::from_lights(&lights, 2).is_err());
    }

    #[test]
    fn test_amplitude_is_height_over_oscillators() {
        let layout = BandLayout::from_lights(&column(&[0.0, 1.0, 2.0]), 2).unwrap();
        assert_eq!(layout.height(), 2.0);
        assert_eq!(layout.amplitude(), 1.0);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.bands()[0], Band { lower: 0.0, upper: 1.0 });
        assert_eq!(layout.bands()[1], Band { lower: 1.0, upper: 2.0 });
    }

    #[test]
    fn test_bands_are_contiguous() {
        let layout = BandLayout::new(7.3, 9).unwrap();
        for pair in layout.bands().windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
            assert!(pair[0].lower < pair[0].upper);
        }
        assert_eq!(layout.bands()[0].lower, 0.0);
    }

    #[test]
    fn test_empty_tree_has_zero_height() {
        let layout = BandLayout::from_lights(&[], 3).unwrap();
        assert_eq!(layout.height(), 0.0);
        assert_eq!(layout.amplitude(), 0.0);
        assert_eq!(layout.len(), 3);
        assert!(!layout.is_empty());
    }

    // ── classify ──────────────────────────────────────────────────────────

    #[test]
    fn test_classify_interior_points() {
        let layout = BandLayout::new(3.0, 3).unwrap();
        assert_eq!(layout.classify(0.5), Some(0));
        assert_eq!(layout.classify(1.5), Some(1));
        assert_eq!(layout.classify(2.999), Some(2));
    }

    #[test]
    fn test_classify_boundaries_match_nothing() {
        let layout = BandLayout::new(2.0, 2).unwrap();
        assert_eq!(layout.classify(0.0), None);
        assert_eq!(layout.classify(1.0), None);
        assert_eq!(layout.classify(2.0), None);
    }

    #[test]
    fn test_classify_outside_tree_matches_nothing() {
        let layout = BandLayout::new(2.0, 2).unwrap();
        assert_eq!(layout.classify(-0.1), None);
        assert_eq!(layout.classify(2.1), None);
    }

    #[test]
    fn test_bands_not_offset_by_min_z() {
        // Tree spanning z = 10..12: bands cover 0..2, so every light misses.
        let layout = BandLayout::from_lights(&column(&[10.0, 11.0, 12.0]), 2).unwrap();
        assert_eq!(layout.classify(10.5), None);
        assert_eq!(layout.classify(0.5), Some(0));
    }

    #[test]
    fn test_free_classify_matches_layout() {
        let layout = BandLayout::new(4.0, 4).unwrap();
        for z in [-1.0, 0.0, 0.2, 1.0, 1.7, 3.99, 4.0, 9.0] {
            assert_eq!(classify(z, layout.bands()), layout.classify(z));
        }
    }

    // ── nearest ───────────────────────────────────────────────────────────

    #[test]
    fn test_nearest_prefers_lower_band_on_boundary() {
        let layout = BandLayout::new(2.0, 2).unwrap();
        assert_eq!(layout.nearest(1.0), 0);
        assert_eq!(layout.nearest(0.0), 0);
    }

    #[test]
    fn test_nearest_clamps_outside_tree() {
        let layout = BandLayout::new(3.0, 3).unwrap();
        assert_eq!(layout.nearest(-5.0), 0);
        assert_eq!(layout.nearest(3.0), 2);
        assert_eq!(layout.nearest(40.0), 2);
    }

    #[test]
    fn test_nearest_agrees_with_classify_inside() {
        let layout = BandLayout::new(3.0, 3).unwrap();
        for z in [0.1, 0.9, 1.1, 1.9, 2.5] {
            assert_eq!(Some(layout.nearest(z)), layout.classify(z));
        }
    }

    #[test]
    fn test_flat_tree_nearest_is_first_band() {
        let layout = BandLayout::from_lights(&column(&[1.0, 1.0]), 4).unwrap();
        assert_eq!(layout.classify(1.0), None);
        assert_eq!(layout.nearest(1.0), 0);
    }
}
