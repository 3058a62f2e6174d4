//! # Spiral tree demo
//!
//! Wraps 250 lights around a cone, runs a ten-second animation with five
//! coupled bands and prints the CSV table on stdout. Band synchrony per
//! second is reported on stderr.
//!
//! ```bash
//! cargo run --example tree --features std > tree.csv
//! RUST_LOG=kuramoto_lights=trace cargo run --example tree --features std > tree.csv
//! ```

use std::f64::consts::TAU;

use kuramoto_lights::config::{SimulationConfig, UnmatchedPolicy};
use kuramoto_lights::geometry::Light;
use kuramoto_lights::sequencer::FrameSequencer;
use kuramoto_lights::table::{FrameRow, OutputTable};
use tracing_subscriber::EnvFilter;

const LIGHTS: usize = 250;
const TURNS: f64 = 9.0;
const HEIGHT: f64 = 2.2;
const BASE_RADIUS: f64 = 0.7;

/// Lights wound upward around a cone, lowest first.
fn cone() -> Vec<Light> {
    (0..LIGHTS)
        .map(|i| {
            let t = i as f64 / (LIGHTS - 1) as f64;
            let angle = TAU * TURNS * t;
            let radius = BASE_RADIUS * (1.0 - t);
            Light::new(radius * angle.cos(), radius * angle.sin(), HEIGHT * t)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let lights = cone();
    let config = SimulationConfig::new(30, 10, 5, 0.02).with_unmatched(UnmatchedPolicy::NearestBand);

    let sequencer = FrameSequencer::new(&lights, &config)?;
    let fps = config.fps;
    eprintln!(
        "▶  {} lights, {} bands of {:.3} m, {} frames",
        sequencer.light_count(),
        sequencer.layout().len(),
        sequencer.layout().amplitude(),
        sequencer.frame_count()
    );

    let mut table = OutputTable::with_capacity(lights.len(), sequencer.frame_count() as usize);
    for frame in sequencer {
        if frame.index % fps == 0 {
            eprintln!(
                "   t = {:>2}s  synchrony r = {:.3}",
                frame.index / fps,
                frame.coherence
            );
        }
        table.push_row(FrameRow::from(frame))?;
    }

    print!("{table}");
    Ok(())
}
