//! Occupant trip workflows
//!
//! A trip is the same for every class: ask the monitor for entry, hold
//! the bridge for the sampled crossing time, then report the departure.
//! All synchronization lives in the monitor; this layer adds logging and
//! the crossing record.

use log::debug;
use std::thread;
use std::time::{Duration, Instant};

use super::monitor::BridgeMonitor;
use super::stats::{CrossingLog, CrossingRecord};
use super::types::{CarId, Direction, PedestrianId, TrafficClass};

/// Drive one car across the bridge and log the crossing
pub fn run_car(
    monitor: &BridgeMonitor,
    crossings: &CrossingLog,
    id: CarId,
    direction: Direction,
    crossing_time: Duration,
) {
    debug!(
        "car {} heading {} wants to enter. {}",
        id,
        direction,
        monitor.snapshot()
    );
    let requested_at = Instant::now();
    monitor.wants_enter_car(direction);
    let entered_at = Instant::now();
    debug!(
        "car {} heading {} enters the bridge. {}",
        id,
        direction,
        monitor.snapshot()
    );

    thread::sleep(crossing_time);

    debug!(
        "car {} heading {} leaving the bridge. {}",
        id,
        direction,
        monitor.snapshot()
    );
    let left_at = Instant::now();
    monitor.leaves_car(direction);
    debug!(
        "car {} heading {} out of the bridge. {}",
        id,
        direction,
        monitor.snapshot()
    );

    crossings.record(CrossingRecord {
        class: TrafficClass::cars(direction),
        requested_at,
        entered_at,
        left_at,
    });
}

/// Walk one pedestrian across the bridge and log the crossing
pub fn run_pedestrian(
    monitor: &BridgeMonitor,
    crossings: &CrossingLog,
    id: PedestrianId,
    crossing_time: Duration,
) {
    debug!("pedestrian {} wants to enter. {}", id, monitor.snapshot());
    let requested_at = Instant::now();
    monitor.wants_enter_pedestrian();
    let entered_at = Instant::now();
    debug!("pedestrian {} enters the bridge. {}", id, monitor.snapshot());

    thread::sleep(crossing_time);

    debug!("pedestrian {} leaving the bridge. {}", id, monitor.snapshot());
    let left_at = Instant::now();
    monitor.leaves_pedestrian();
    debug!("pedestrian {} out of the bridge. {}", id, monitor.snapshot());

    crossings.record(CrossingRecord {
        class: TrafficClass::Pedestrians,
        requested_at,
        entered_at,
        left_at,
    });
}
