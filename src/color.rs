/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Phase-to-colour curve.
//!
//! Each light samples a travelling wave
//!
//! ```text
//! signal = sin(2·y + 0.05·frame + θ_band)
//! w      = exp(−30 · signal²)
//! ```
//!
//! `w` peaks at 1 where the wave crosses zero and falls to ~0 elsewhere.
//! Near the crossing the light glows green-blue, away from it a dim red:
//!
//! | Channel | Formula | Range |
//! |---|---|---|
//! | R | `round(30 · (1 − w))` | 0–30 |
//! | G | `round(90 · w)` | 0–90 |
//! | B | `round(90 · w)` | 0–90, always equal to G |
//!
//! The channels are bounded by construction, so no clamping is applied.

/// Spatial frequency of the wave along `y`.
pub const WAVE_NUMBER: f64 = 2.0;

/// Phase advance of the wave per frame, in radians.
pub const FRAME_DRIFT: f64 = 0.05;

/// Width control of the green-blue peak. Larger is narrower.
pub const PEAK_SHARPNESS: f64 = 30.0;

/// Red channel value away from the wave crossing.
pub const RED_LEVEL: f64 = 30.0;

/// Green and blue channel value at the wave crossing.
pub const CYAN_LEVEL: f64 = 90.0;

/// One light's colour for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// All channels off.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Construct a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as `[r, g, b]`.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.to_array()
    }
}

/// Wave value seen by a light at horizontal coordinate `light_y` on frame
/// `frame_index` under the given oscillator phase.
pub fn signal(light_y: f64, frame_index: u32, governing_phase: f64) -> f64 {
    libm::sin(WAVE_NUMBER * light_y + FRAME_DRIFT * frame_index as f64 + governing_phase)
}

/// Map a wave value to a colour.
///
/// A non-finite signal (from a diverged phase) renders black.
pub fn from_signal(signal: f64) -> Rgb {
    let w = libm::exp(-PEAK_SHARPNESS * signal * signal);
    Rgb {
        r: channel(RED_LEVEL * (1.0 - w)),
        g: channel(CYAN_LEVEL * w),
        b: channel(CYAN_LEVEL * w),
    }
}

/// Colour of a light at `light_y` on frame `frame_index`, driven by the
/// phase of the oscillator governing its band.
pub fn color(light_y: f64, frame_index: u32, governing_phase: f64) -> Rgb {
    from_signal(signal(light_y, frame_index, governing_phase))
}

// `as` saturates and maps NaN to 0.
fn channel(level: f64) -> u8 {
    libm::round(level) as u8
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_signal_is_full_cyan() {
        assert_eq!(from_signal(0.0), Rgb::new(0, 90, 90));
    }

    #[test]
    fn test_unit_signal_is_full_red() {
        // exp(-30) ≈ 9.4e-14, far below rounding resolution.
        assert_eq!(from_signal(1.0), Rgb::new(30, 0, 0));
        assert_eq!(from_signal(-1.0), Rgb::new(30, 0, 0));
    }

    #[test]
    fn test_curve_is_symmetric_in_signal() {
        for i in 0..=100 {
            let s = i as f64 / 100.0;
            assert_eq!(from_signal(s), from_signal(-s), "s = {}", s);
        }
    }

    #[test]
    fn test_channel_bounds_and_green_equals_blue() {
        for i in -1000..=1000 {
            let s = i as f64 / 1000.0;
            let c = from_signal(s);
            assert!(c.r <= 30, "r = {} at s = {}", c.r, s);
            assert!(c.g <= 90, "g = {} at s = {}", c.g, s);
            assert_eq!(c.g, c.b, "g != b at s = {}", s);
        }
    }

    #[test]
    fn test_intermediate_signal_matches_formula() {
        let s: f64 = 0.1;
        let w = libm::exp(-30.0 * s * s);
        let c = from_signal(s);
        assert_eq!(c.r, libm::round(30.0 * (1.0 - w)) as u8);
        assert_eq!(c.g, libm::round(90.0 * w) as u8);
        assert_eq!((c.r, c.g), (8, 67));
    }

    #[test]
    fn test_red_and_cyan_move_in_opposite_directions() {
        let near = from_signal(0.05);
        let far = from_signal(0.3);
        assert!(near.g > far.g);
        assert!(near.r < far.r);
    }

    #[test]
    fn test_color_composes_signal() {
        let (y, frame, phase) = (0.7, 12, 2.0);
        let expected = libm::sin(2.0 * 0.7 + 0.05 * 12.0 + 2.0);
        assert!((signal(y, frame, phase) - expected).abs() < 1e-12);
        assert_eq!(color(y, frame, phase), from_signal(expected));
    }

    #[test]
    fn test_non_finite_phase_renders_black() {
        assert_eq!(color(0.0, 0, f64::INFINITY), Rgb::BLACK);
        assert_eq!(color(0.0, 0, f64::NAN), Rgb::BLACK);
    }

    #[test]
    fn test_rgb_array_conversion() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(c.to_array(), [1, 2, 3]);
        assert_eq!(<[u8; 3]>::from(c), [1, 2, 3]);
    }
}
