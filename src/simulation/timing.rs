//! Arrival and crossing-time sampling
//!
//! Each traffic stream draws inter-arrival gaps from an exponential
//! distribution and per-occupant crossing times from a normal
//! distribution. Cars arrive quickly and cross fast; pedestrians arrive
//! rarely and take their time.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp, Normal};
use std::time::Duration;

/// Duration sampler for one traffic stream.
///
/// Owns its RNG so every stream can run on its own thread without
/// sharing generator state.
#[derive(Debug, Clone)]
pub struct StreamTiming {
    arrival: Exp<f64>,
    crossing: Normal<f64>,
    rng: StdRng,
}

impl StreamTiming {
    /// Build the samplers for one stream.
    ///
    /// `arrival_mean` is the mean gap between arrivals in seconds and must
    /// be positive. `crossing_mean` and `crossing_std` parameterize the
    /// normal distribution of time spent on the bridge.
    pub fn new(
        arrival_mean: f64,
        crossing_mean: f64,
        crossing_std: f64,
        rng: StdRng,
    ) -> Result<Self> {
        let arrival = Exp::new(1.0 / arrival_mean)
            .map_err(|err| anyhow!("invalid arrival distribution: {err}"))?;
        let crossing = Normal::new(crossing_mean, crossing_std)
            .map_err(|err| anyhow!("invalid crossing-time distribution: {err}"))?;
        Ok(Self {
            arrival,
            crossing,
            rng,
        })
    }

    /// Gap to sleep before releasing the next occupant
    pub fn next_arrival_gap(&mut self) -> Duration {
        Duration::from_secs_f64(self.arrival.sample(&mut self.rng))
    }

    /// Time the next occupant will hold the bridge. Negative samples from
    /// the normal tail are clamped to zero.
    pub fn next_crossing_time(&mut self) -> Duration {
        Duration::from_secs_f64(self.crossing.sample(&mut self.rng).max(0.0))
    }
}
