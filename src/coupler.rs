/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! All-to-all Kuramoto phase coupling.
//!
//! One call to [`advance`] is one unit-step Euler update of
//!
//! ```text
//! θᵢ ← θᵢ + K Σⱼ sin(θⱼ − θᵢ)
//! ```
//!
//! Every oscillator shares the same natural frequency, so only the coupling
//! term moves the phases. Phases are never wrapped to `[0, 2π)`.
//!
//! # Invariants
//!
//! - **Synchronous update**: every term of step `t + 1` reads the phases of
//!   step `t`. The input slice is borrowed immutably and the result is a new
//!   vector, so no term can observe a partially updated state.
//! - **Fixed points**: `K = 0`, or all phases equal, returns the input unchanged.
//! - Deterministic in every build: trigonometry comes from `libm`.

use alloc::vec::Vec;

/// Spacing between consecutive initial phases, in radians.
pub const INITIAL_PHASE_SPACING: f64 = 2.0;

/// Initial phase vector for `oscillators` oscillators: `phase[j] = 2j`.
pub fn initial_phases(oscillators: usize) -> Vec<f64> {
    (0..oscillators)
        .map(|j| INITIAL_PHASE_SPACING * j as f64)
        .collect()
}

/// Advance every phase by one coupling step with strength `k`.
///
/// The self term `j == i` contributes `sin(0) = 0` and is summed like any
/// other. O(n²) in the number of oscillators.
pub fn advance(phases: &[f64], k: f64) -> Vec<f64> {
    phases
        .iter()
        .map(|&theta_i| {
            let pull: f64 = phases
                .iter()
                .map(|&theta_j| libm::sin(theta_j - theta_i))
                .sum();
            theta_i + k * pull
        })
        .collect()
}

/// Kuramoto order parameter `(r, ψ)` where `r·e^{iψ} = (1/N) Σⱼ e^{iθⱼ}`.
///
/// `r` is 1.0 when every oscillator is in phase and near 0.0 when phases are
/// spread evenly around the circle. An empty slice yields `(0.0, 0.0)`.
pub fn order_parameter(phases: &[f64]) -> (f64, f64) {
    if phases.is_empty() {
        return (0.0, 0.0);
    }
    let n = phases.len() as f64;
    let (sum_cos, sum_sin) = phases.iter().fold((0.0, 0.0), |(c, s), &theta| {
        (c + libm::cos(theta), s + libm::sin(theta))
    });
    let (mean_cos, mean_sin) = (sum_cos / n, sum_sin / n);
    let r = libm::sqrt(mean_cos * mean_cos + mean_sin * mean_sin);
    (r, libm::atan2(mean_sin, mean_cos))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const EPS: f64 = 1e-12;

    // ── Initial state ─────────────────────────────────────────────────────

    #[test]
    fn test_initial_phases_are_spaced_by_two() {
        assert_eq!(initial_phases(4), vec![0.0, 2.0, 4.0, 6.0]);
        assert!(initial_phases(0).is_empty());
    }

    // ── advance ───────────────────────────────────────────────────────────

    #[test]
    fn test_zero_coupling_is_identity() {
        let phases = vec![0.3, -1.7, 12.0, 4.4, 100.25];
        assert_eq!(advance(&phases, 0.0), phases);
    }

    #[test]
    fn test_equal_phases_are_a_fixed_point() {
        let phases = vec![1.25; 6];
        assert_eq!(advance(&phases, 0.8), phases);
        assert_eq!(advance(&phases, -5.0), phases);
    }

    #[test]
    fn test_single_oscillator_never_moves() {
        let mut phases = initial_phases(1);
        for _ in 0..50 {
            phases = advance(&phases, 3.0);
        }
        assert_eq!(phases, vec![0.0]);
    }

    #[test]
    fn test_empty_phase_vector() {
        assert!(advance(&[], 0.5).is_empty());
    }

    #[test]
    fn test_two_oscillators_match_closed_form() {
        let k = 0.1;
        let next = advance(&[0.0, 2.0], k);
        let expected_0 = k * libm::sin(2.0);
        let expected_1 = 2.0 + k * libm::sin(-2.0);
        assert!((next[0] - expected_0).abs() < EPS, "got {}", next[0]);
        assert!((next[1] - expected_1).abs() < EPS, "got {}", next[1]);
    }

    #[test]
    fn test_update_reads_only_previous_state() {
        // Three oscillators: each new value must use the pre-step snapshot,
        // including for indices computed after earlier ones changed.
        let phases = [0.0, 1.0, 2.5];
        let k = 0.4;
        let next = advance(&phases, k);
        for i in 0..3 {
            let pull: f64 = phases.iter().map(|&t| libm::sin(t - phases[i])).sum();
            assert!((next[i] - (phases[i] + k * pull)).abs() < EPS);
        }
    }

    #[test]
    fn test_positive_coupling_pulls_pair_together() {
        let phases = [0.0, 1.0];
        let next = advance(&phases, 0.1);
        let gap_before = phases[1] - phases[0];
        let gap_after = next[1] - next[0];
        assert!(gap_after < gap_before, "{} !< {}", gap_after, gap_before);
    }

    #[test]
    fn test_negative_coupling_pushes_pair_apart() {
        let phases = [0.0, 1.0];
        let next = advance(&phases, -0.1);
        assert!(next[1] - next[0] > 1.0);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let phases = vec![0.0, 2.0, 4.0];
        let snapshot = phases.clone();
        let _ = advance(&phases, 0.7);
        assert_eq!(phases, snapshot);
    }

    // ── order_parameter ───────────────────────────────────────────────────

    #[test]
    fn test_order_parameter_synchronised() {
        let (r, psi) = order_parameter(&[0.5, 0.5, 0.5]);
        assert!((r - 1.0).abs() < EPS);
        assert!((psi - 0.5).abs() < EPS);
    }

    #[test]
    fn test_order_parameter_antiphase_pair_is_zero() {
        let (r, _) = order_parameter(&[0.0, core::f64::consts::PI]);
        assert!(r < 1e-9, "got {}", r);
    }

    #[test]
    fn test_order_parameter_empty() {
        assert_eq!(order_parameter(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_coupling_raises_synchrony() {
        let mut phases = vec![0.0, 0.4, 0.8, 1.2];
        let (r_before, _) = order_parameter(&phases);
        for _ in 0..20 {
            phases = advance(&phases, 0.05);
        }
        let (r_after, _) = order_parameter(&phases);
        assert!(r_after > r_before, "{} !> {}", r_after, r_before);
    }
}
