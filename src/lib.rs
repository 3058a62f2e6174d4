//! # kuramoto-lights
//!
//! Animations for addressable LED trees driven by coupled phase oscillators.
//!
//! ---
//!
//! ## How a frame is made
//!
//! The tree is cut into equal horizontal **bands**, one per oscillator. Every
//! frame, all oscillators pull on each other's phases through all-to-all
//! Kuramoto coupling; each light then samples a travelling sine wave shifted
//! by its band's phase and turns the result into a colour. Where the wave
//! crosses zero a light flashes green-blue; elsewhere it rests at a dim red.
//!
//! As coupling synchronises the oscillators, the bands fall into step and the
//! flashes sweep the tree together. With negative coupling they drift apart.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! Lights ─► BandLayout ─┐
//!                       ├─► FrameSequencer ─► Frame ─► OutputTable ─► CSV
//! phases ─► advance() ──┘        │
//!                              color()
//! ```
//!
//! ## Module overview
//!
//! | Module | Key items | What it does |
//! |--------|-----------|--------------|
//! | [`geometry`] | [`geometry::Light`], [`geometry::VerticalExtent`] | Light positions and tree height |
//! | [`coupler`] | [`coupler::advance`], [`coupler::order_parameter`] | One synchronous Kuramoto step; synchrony measure |
//! | [`band`] | [`band::BandLayout`], [`band::classify`] | Equal-height bands, one per oscillator |
//! | [`color`] | [`color::color`], [`color::Rgb`] | Phase-to-colour curve |
//! | [`sequencer`] | [`sequencer::FrameSequencer`], [`sequencer::Frame`] | Frame loop state machine |
//! | [`table`] | [`table::OutputTable`], [`table::serialize`] | Header, rows and CSV rendering |
//! | [`config`] | [`config::SimulationConfig`], [`config::UnmatchedPolicy`] | Run parameters |
//! | [`error`] | [`error::SimulationError`] | Configuration and table errors |
//!
//! ## Example
//!
//! ```rust
//! use kuramoto_lights::config::SimulationConfig;
//! use kuramoto_lights::geometry::Light;
//!
//! let lights = [
//!     Light::new(0.0, 0.0, 0.0),
//!     Light::new(0.1, 0.4, 0.7),
//!     Light::new(0.2, 0.8, 1.3),
//!     Light::new(0.0, 0.2, 2.0),
//! ];
//! let config = SimulationConfig::new(2, 1, 2, 0.1);
//! let table = kuramoto_lights::generate(&lights, &config).unwrap();
//!
//! let lines = table.to_lines();
//! assert_eq!(lines.len(), 3);
//! assert!(lines[0].starts_with("FRAME_ID,R_0,G_0,B_0"));
//! ```
//!
//! ## `no_std`
//!
//! The crate is `#![no_std]` with `alloc` by default. Trigonometry comes from
//! `libm` in every build so tables are bit-identical with and without `std`.
//! Enable `std` for the standard-library error and tracing integrations,
//! `serde` for serialisation of configs and tables, and `parallel` to colour
//! the lights of each frame on the rayon pool.
//!
//! ## Logging
//!
//! Diagnostics are emitted through `tracing`: one `debug` event when a run is
//! initialised and when the table is complete, `trace` events per frame. The
//! crate never installs a subscriber.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

pub mod band;
pub mod color;
pub mod config;
pub mod coupler;
pub mod error;
pub mod geometry;
pub mod sequencer;
pub mod table;

use config::SimulationConfig;
use error::SimulationResult;
use geometry::Light;
use sequencer::FrameSequencer;
use table::OutputTable;

/// Run a complete animation and return its table.
///
/// Fails only on invalid configuration or non-finite light positions.
pub fn generate(lights: &[Light], config: &SimulationConfig) -> SimulationResult<OutputTable> {
    Ok(FrameSequencer::new(lights, config)?.run())
}

/// [`generate`] with the run parameters passed individually and unmatched
/// lights rendered black.
///
/// `fps * duration` frames are produced for `oscillators` bands coupled with
/// strength `k`.
pub fn render(
    leds: &[Light],
    fps: u32,
    duration: u32,
    oscillators: usize,
    k: f64,
) -> SimulationResult<OutputTable> {
    generate(leds, &SimulationConfig::new(fps, duration, oscillators, k))
}
