//! Traffic generators
//!
//! One generator per stream releases its whole population, sleeping an
//! exponentially distributed gap between releases. Occupants run on
//! scoped threads, so a generator returns only after every occupant it
//! released has finished its crossing.

use anyhow::{Context, Result};
use log::debug;
use std::thread;

use super::monitor::BridgeMonitor;
use super::occupant::{run_car, run_pedestrian};
use super::stats::CrossingLog;
use super::timing::StreamTiming;
use super::types::{CarId, Direction, PedestrianId};

/// Release `count` cars heading `direction` and wait for all of them
pub fn generate_cars(
    monitor: &BridgeMonitor,
    crossings: &CrossingLog,
    direction: Direction,
    count: u32,
    mut timing: StreamTiming,
) -> Result<()> {
    thread::scope(|scope| -> Result<()> {
        for seq in 1..=count {
            let id = CarId(seq);
            let crossing_time = timing.next_crossing_time();
            thread::Builder::new()
                .name(format!("car-{}-{}", direction.label(), seq))
                .spawn_scoped(scope, move || {
                    run_car(monitor, crossings, id, direction, crossing_time)
                })
                .context("failed to spawn car thread")?;
            thread::sleep(timing.next_arrival_gap());
        }
        Ok(())
    })?;
    debug!("car generator {} released {} cars", direction, count);
    Ok(())
}

/// Release `count` pedestrians and wait for all of them
pub fn generate_pedestrians(
    monitor: &BridgeMonitor,
    crossings: &CrossingLog,
    count: u32,
    mut timing: StreamTiming,
) -> Result<()> {
    thread::scope(|scope| -> Result<()> {
        for seq in 1..=count {
            let id = PedestrianId(seq);
            let crossing_time = timing.next_crossing_time();
            thread::Builder::new()
                .name(format!("pedestrian-{}", seq))
                .spawn_scoped(scope, move || {
                    run_pedestrian(monitor, crossings, id, crossing_time)
                })
                .context("failed to spawn pedestrian thread")?;
            thread::sleep(timing.next_arrival_gap());
        }
        Ok(())
    })?;
    debug!("pedestrian generator released {} pedestrians", count);
    Ok(())
}
