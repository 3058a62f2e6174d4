/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Frame loop: couple, colour, emit.
//!
//! # State machine
//!
//! ```text
//! new() ──(validate, build bands, seed phases)──► Running { frame: 0 }
//!                                                  │  step(): couple → paint → emit
//!                                                  ▼
//!                                   Running { frame: f + 1 } … ──► Done
//! ```
//!
//! Construction is the initialising phase and is the only place a run can
//! fail. A sequencer with zero frames starts in [`SequencerState::Done`].
//!
//! # Invariants
//!
//! - Frames are produced strictly in order; frame `f + 1` starts from the
//!   phases emitted with frame `f`.
//! - Band classification happens per light per frame against the static
//!   layout built at construction.
//! - Colours are reassembled in light-index order before a row is emitted,
//!   also when the `parallel` feature evaluates lights concurrently.

use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::band::BandLayout;
use crate::color::{self, Rgb};
use crate::config::{SimulationConfig, UnmatchedPolicy};
use crate::coupler;
use crate::error::SimulationResult;
use crate::geometry::{self, Light};
use crate::table::{FrameRow, OutputTable};

/// Where the sequencer is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// The next call to [`FrameSequencer::step`] produces `frame`.
    Running {
        /// Index of the next frame.
        frame: u32,
    },
    /// Every frame has been produced.
    Done,
}

/// One animation frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Frame index, starting at 0.
    pub index: u32,
    /// Oscillator phases after this frame's coupling step.
    pub phases: Vec<f64>,
    /// Kuramoto order parameter `r` of `phases`, in [0.0, 1.0].
    ///
    /// NaN once a phase has diverged to ±∞ or NaN; such frames also render
    /// black (see [`color::from_signal`]).
    pub coherence: f64,
    /// Colour of every light, in light-index order.
    pub colors: Vec<Rgb>,
}

impl From<Frame> for FrameRow {
    fn from(frame: Frame) -> Self {
        FrameRow {
            frame: frame.index,
            colors: frame.colors,
        }
    }
}

/// Drives one run over a borrowed set of lights.
///
/// Also an [`Iterator`] over [`Frame`]s.
#[derive(Clone, Debug)]
pub struct FrameSequencer<'a> {
    lights: &'a [Light],
    layout: BandLayout,
    coupling: f64,
    unmatched: UnmatchedPolicy,
    phases: Vec<f64>,
    frame_count: u32,
    state: SequencerState,
}

impl<'a> FrameSequencer<'a> {
    /// Validate inputs, partition the tree into bands and seed the phases.
    pub fn new(lights: &'a [Light], config: &SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        geometry::check_finite(lights)?;
        let frame_count = config.frame_count()?;
        let layout = BandLayout::from_lights(lights, config.oscillators)?;

        debug!(
            lights = lights.len(),
            oscillators = config.oscillators,
            frames = frame_count,
            height = layout.height(),
            amplitude = layout.amplitude(),
            "frame sequencer initialised"
        );

        Ok(Self {
            lights,
            layout,
            coupling: config.coupling,
            unmatched: config.unmatched,
            phases: coupler::initial_phases(config.oscillators),
            frame_count,
            state: if frame_count == 0 {
                SequencerState::Done
            } else {
                SequencerState::Running { frame: 0 }
            },
        })
    }

    /// Current state.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Total frames in the run.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Number of lights (table column triplets).
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Phases after the most recent frame, or the seed phases before the first.
    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// The static band partition.
    pub fn layout(&self) -> &BandLayout {
        &self.layout
    }

    /// Frames not yet produced.
    pub fn remaining(&self) -> u32 {
        match self.state {
            SequencerState::Running { frame } => self.frame_count - frame,
            SequencerState::Done => 0,
        }
    }

    /// Produce the next frame, or `None` once the run is done.
    pub fn step(&mut self) -> Option<Frame> {
        let index = match self.state {
            SequencerState::Running { frame } => frame,
            SequencerState::Done => return None,
        };

        let next = coupler::advance(&self.phases, self.coupling);
        let colors = self.paint(index, &next);
        let (coherence, _) = coupler::order_parameter(&next);

        trace!(
            frame = index,
            lead_phase = next.first().copied().unwrap_or_default(),
            coherence,
            "frame advanced"
        );

        self.phases.clone_from(&next);
        self.state = if index + 1 < self.frame_count {
            SequencerState::Running { frame: index + 1 }
        } else {
            SequencerState::Done
        };

        Some(Frame {
            index,
            phases: next,
            coherence,
            colors,
        })
    }

    /// Run every remaining frame and collect the table.
    pub fn run(self) -> OutputTable {
        let led_count = self.lights.len();
        let rows: Vec<FrameRow> = self.map(FrameRow::from).collect();
        debug!(rows = rows.len(), "frame table complete");
        OutputTable::from_rows(led_count, rows)
    }

    /// Colour every light for frame `index` under `phases`.
    fn paint(&self, index: u32, phases: &[f64]) -> Vec<Rgb> {
        let matched = self.matched_colors(index, phases);

        let unmatched = matched.iter().filter(|c| c.is_none()).count();
        if unmatched > 0 {
            trace!(frame = index, unmatched, policy = ?self.unmatched, "lights outside every band");
        }

        let mut carried = Rgb::BLACK;
        matched
            .into_iter()
            .zip(self.lights)
            .map(|(found, light)| match found {
                Some(c) => {
                    carried = c;
                    c
                }
                None => match self.unmatched {
                    UnmatchedPolicy::Black => Rgb::BLACK,
                    UnmatchedPolicy::NearestBand => {
                        let band = self.layout.nearest(light.z);
                        color::color(light.y, index, phases[band])
                    }
                    UnmatchedPolicy::CarryOver => carried,
                },
            })
            .collect()
    }

    /// Colour of each light that lies inside a band; `None` for the rest.
    #[cfg(not(feature = "parallel"))]
    fn matched_colors(&self, index: u32, phases: &[f64]) -> Vec<Option<Rgb>> {
        self.lights
            .iter()
            .map(|light| self.matched_color(light, index, phases))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn matched_colors(&self, index: u32, phases: &[f64]) -> Vec<Option<Rgb>> {
        self.lights
            .par_iter()
            .map(|light| self.matched_color(light, index, phases))
            .collect()
    }

    fn matched_color(&self, light: &Light, index: u32, phases: &[f64]) -> Option<Rgb> {
        self.layout
            .classify(light.z)
            .map(|band| color::color(light.y, index, phases[band]))
    }
}

impl Iterator for FrameSequencer<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for FrameSequencer<'_> {}

// ─── Tests ──────────────────────────────────────────────────────────────────
