//! Standalone bridge crossing simulation module
//!
//! This module contains the monitor that arbitrates the one-lane bridge
//! and the traffic layer around it. Everything here runs on plain threads
//! and can be driven from tests without the command-line front end.

mod generator;
mod monitor;
mod occupant;
mod stats;
mod timing;
mod types;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use generator::{generate_cars, generate_pedestrians};
#[allow(unused_imports)]
pub use monitor::{BridgeMonitor, BridgeSnapshot};
#[allow(unused_imports)]
pub use occupant::{run_car, run_pedestrian};
#[allow(unused_imports)]
pub use stats::{CrossingLog, CrossingRecord, SimReport};
#[allow(unused_imports)]
pub use timing::StreamTiming;
#[allow(unused_imports)]
pub use types::{CarId, Direction, PedestrianId, TrafficClass};
#[allow(unused_imports)]
pub use world::{
    run_simulation, SimConfig, DEFAULT_CARS_PER_DIRECTION, DEFAULT_CAR_ARRIVAL_MEAN_SECS,
    DEFAULT_CAR_CROSSING_MEAN_SECS, DEFAULT_CAR_CROSSING_STD_SECS, DEFAULT_PEDESTRIANS,
    DEFAULT_PED_ARRIVAL_MEAN_SECS, DEFAULT_PED_CROSSING_MEAN_SECS, DEFAULT_PED_CROSSING_STD_SECS,
};
