//! Error types for frame-table generation.
//!
//! The simulation itself is total: once a [`FrameSequencer`] exists, every
//! frame is produced without failure. All errors are raised up front while
//! validating the run parameters and light positions.
//!
//! [`FrameSequencer`]: crate::sequencer::FrameSequencer

use alloc::string::String;

use thiserror::Error;

/// Errors raised while preparing or assembling an animation table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A run parameter violates a precondition of the simulation.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// What is wrong with the configuration.
        message: String,
    },

    /// A light position contains NaN or an infinite coordinate.
    #[error("Light {index} has a non-finite coordinate")]
    NonFiniteLight {
        /// Index of the offending light in the input sequence.
        index: usize,
    },

    /// A frame row does not carry exactly one colour per light.
    #[error("Row width mismatch: expected {expected} colours, actual {actual}")]
    RowWidthMismatch {
        /// Number of lights in the table.
        expected: usize,
        /// Number of colours in the rejected row.
        actual: usize,
    },
}

impl SimulationError {
    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a NonFiniteLight error.
    pub fn non_finite_light(index: usize) -> Self {
        Self::NonFiniteLight { index }
    }

    /// Create a RowWidthMismatch error.
    pub fn row_width_mismatch(expected: usize, actual: usize) -> Self {
        Self::RowWidthMismatch { expected, actual }
    }
}

/// Result alias used throughout the crate.
pub type SimulationResult<T> = Result<T, SimulationError>;
