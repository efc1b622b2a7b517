//! Simulation wiring that ties everything together
//!
//! This is the entry point for running the bridge simulation: it builds
//! the monitor, the crossing log, and the three traffic streams, runs the
//! streams to completion, and assembles the report.

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;
use std::time::Instant;

use super::generator::{generate_cars, generate_pedestrians};
use super::monitor::BridgeMonitor;
use super::stats::{CrossingLog, SimReport};
use super::timing::StreamTiming;
use super::types::Direction;

/// Cars released in each direction by default
pub const DEFAULT_CARS_PER_DIRECTION: u32 = 100;

/// Pedestrians released by default
pub const DEFAULT_PEDESTRIANS: u32 = 10;

/// Mean gap between car arrivals in seconds, per direction
pub const DEFAULT_CAR_ARRIVAL_MEAN_SECS: f64 = 0.5;

/// Mean gap between pedestrian arrivals in seconds
pub const DEFAULT_PED_ARRIVAL_MEAN_SECS: f64 = 5.0;

/// Mean car crossing time in seconds
pub const DEFAULT_CAR_CROSSING_MEAN_SECS: f64 = 1.0;

/// Standard deviation of the car crossing time in seconds
pub const DEFAULT_CAR_CROSSING_STD_SECS: f64 = 0.5;

/// Mean pedestrian crossing time in seconds
pub const DEFAULT_PED_CROSSING_MEAN_SECS: f64 = 30.0;

/// Standard deviation of the pedestrian crossing time in seconds
pub const DEFAULT_PED_CROSSING_STD_SECS: f64 = 10.0;

/// Parameters of one simulation run
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Cars released in each direction
    pub cars_per_direction: u32,
    /// Pedestrians released
    pub pedestrians: u32,
    /// Mean gap between car arrivals in seconds, per direction
    pub car_arrival_mean_secs: f64,
    /// Mean gap between pedestrian arrivals in seconds
    pub ped_arrival_mean_secs: f64,
    /// Mean car crossing time in seconds
    pub car_crossing_mean_secs: f64,
    /// Standard deviation of the car crossing time in seconds
    pub car_crossing_std_secs: f64,
    /// Mean pedestrian crossing time in seconds
    pub ped_crossing_mean_secs: f64,
    /// Standard deviation of the pedestrian crossing time in seconds
    pub ped_crossing_std_secs: f64,
    /// Seed for reproducible sampling; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cars_per_direction: DEFAULT_CARS_PER_DIRECTION,
            pedestrians: DEFAULT_PEDESTRIANS,
            car_arrival_mean_secs: DEFAULT_CAR_ARRIVAL_MEAN_SECS,
            ped_arrival_mean_secs: DEFAULT_PED_ARRIVAL_MEAN_SECS,
            car_crossing_mean_secs: DEFAULT_CAR_CROSSING_MEAN_SECS,
            car_crossing_std_secs: DEFAULT_CAR_CROSSING_STD_SECS,
            ped_crossing_mean_secs: DEFAULT_PED_CROSSING_MEAN_SECS,
            ped_crossing_std_secs: DEFAULT_PED_CROSSING_STD_SECS,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reject parameters the samplers cannot work with
    pub fn validate(&self) -> Result<()> {
        let timings = [
            self.car_arrival_mean_secs,
            self.ped_arrival_mean_secs,
            self.car_crossing_mean_secs,
            self.car_crossing_std_secs,
            self.ped_crossing_mean_secs,
            self.ped_crossing_std_secs,
        ];
        if timings.iter().any(|value| !value.is_finite()) {
            bail!("timing parameters must be finite");
        }
        if self.car_arrival_mean_secs <= 0.0 || self.ped_arrival_mean_secs <= 0.0 {
            bail!("arrival means must be positive");
        }
        if self.car_crossing_mean_secs < 0.0 || self.ped_crossing_mean_secs < 0.0 {
            bail!("crossing means must not be negative");
        }
        if self.car_crossing_std_secs < 0.0 || self.ped_crossing_std_secs < 0.0 {
            bail!("crossing standard deviations must not be negative");
        }
        Ok(())
    }

    /// RNG for one stream. Seeded runs give each stream its own offset of
    /// the seed so the three streams sample independently.
    fn stream_rng(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_os_rng(),
        }
    }

    fn car_timing(&self, stream: u64) -> Result<StreamTiming> {
        StreamTiming::new(
            self.car_arrival_mean_secs,
            self.car_crossing_mean_secs,
            self.car_crossing_std_secs,
            self.stream_rng(stream),
        )
    }

    fn ped_timing(&self, stream: u64) -> Result<StreamTiming> {
        StreamTiming::new(
            self.ped_arrival_mean_secs,
            self.ped_crossing_mean_secs,
            self.ped_crossing_std_secs,
            self.stream_rng(stream),
        )
    }
}

/// Run one complete simulation: release every configured occupant, wait
/// for the bridge to clear, and report what happened.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    config.validate()?;

    let monitor = BridgeMonitor::new();
    let crossings = CrossingLog::new();

    // Build the per-stream samplers up front so configuration errors
    // surface before any thread starts.
    let north_timing = config.car_timing(0)?;
    let south_timing = config.car_timing(1)?;
    let ped_timing = config.ped_timing(2)?;

    info!(
        "releasing {} cars per direction and {} pedestrians",
        config.cars_per_direction, config.pedestrians
    );

    let started = Instant::now();
    thread::scope(|scope| -> Result<()> {
        let north = thread::Builder::new()
            .name("gen-north".into())
            .spawn_scoped(scope, || {
                generate_cars(
                    &monitor,
                    &crossings,
                    Direction::North,
                    config.cars_per_direction,
                    north_timing,
                )
            })
            .context("failed to spawn north car generator")?;
        let south = thread::Builder::new()
            .name("gen-south".into())
            .spawn_scoped(scope, || {
                generate_cars(
                    &monitor,
                    &crossings,
                    Direction::South,
                    config.cars_per_direction,
                    south_timing,
                )
            })
            .context("failed to spawn south car generator")?;
        let pedestrians = thread::Builder::new()
            .name("gen-pedestrians".into())
            .spawn_scoped(scope, || {
                generate_pedestrians(&monitor, &crossings, config.pedestrians, ped_timing)
            })
            .context("failed to spawn pedestrian generator")?;

        for generator in [north, south, pedestrians] {
            generator
                .join()
                .map_err(|_| anyhow!("traffic generator panicked"))??;
        }
        Ok(())
    })?;

    debug!("final bridge state. {}", monitor.snapshot());

    let report = crossings.report(started.elapsed());
    if report.class_conflicts > 0 {
        warn!(
            "detected {} crossings that overlapped a rival class",
            report.class_conflicts
        );
    }
    Ok(report)
}
