//! Crossing statistics
//!
//! Occupants append one record per completed crossing. The report
//! aggregates totals and wait times and counts cross-class overlaps,
//! which any correct run keeps at zero.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::types::TrafficClass;

/// One completed crossing, timestamped at the workflow milestones.
///
/// `entered_at` is stamped after the monitor admitted the occupant and
/// `left_at` before it reported its departure, so the recorded interval
/// always lies inside the true occupancy of the bridge.
#[derive(Debug, Clone, Copy)]
pub struct CrossingRecord {
    pub class: TrafficClass,
    /// When the occupant asked to enter
    pub requested_at: Instant,
    /// When the monitor let it onto the span
    pub entered_at: Instant,
    /// When it stepped off the span
    pub left_at: Instant,
}

impl CrossingRecord {
    /// Time spent blocked at the entrance
    pub fn wait(&self) -> Duration {
        self.entered_at.duration_since(self.requested_at)
    }

    /// Time spent on the bridge
    pub fn occupancy(&self) -> Duration {
        self.left_at.duration_since(self.entered_at)
    }
}

/// Shared append-only log of completed crossings
#[derive(Debug, Default)]
pub struct CrossingLog {
    records: Mutex<Vec<CrossingRecord>>,
}

impl CrossingLog {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Append one completed crossing
    pub fn record(&self, record: CrossingRecord) {
        self.records.lock().push(record);
    }

    /// Copy of every record so far
    pub fn records(&self) -> Vec<CrossingRecord> {
        self.records.lock().clone()
    }

    /// Number of crossings recorded so far
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Aggregate everything recorded so far into a report
    pub fn report(&self, wall_clock: Duration) -> SimReport {
        let records = self.records();

        let count_of = |class: TrafficClass| records.iter().filter(|r| r.class == class).count();
        let longest_wait = records.iter().map(|r| r.wait()).max().unwrap_or_default();
        let total_wait: Duration = records.iter().map(|r| r.wait()).sum();
        let average_wait = if records.is_empty() {
            Duration::ZERO
        } else {
            total_wait / records.len() as u32
        };

        SimReport {
            cars_north: count_of(TrafficClass::NorthCars),
            cars_south: count_of(TrafficClass::SouthCars),
            pedestrians: count_of(TrafficClass::Pedestrians),
            class_conflicts: count_conflicted_crossings(&records),
            longest_wait,
            average_wait,
            wall_clock,
        }
    }
}

/// Aggregated results of one simulation run
#[derive(Debug, Clone)]
pub struct SimReport {
    /// Completed crossings by north-bound cars
    pub cars_north: usize,
    /// Completed crossings by south-bound cars
    pub cars_south: usize,
    /// Completed crossings by pedestrians
    pub pedestrians: usize,
    /// Crossings that began while a conflicting class was still on the
    /// bridge. Zero in any correct run.
    pub class_conflicts: usize,
    /// Longest time any occupant was blocked at an entrance
    pub longest_wait: Duration,
    /// Mean blocked time across all occupants
    pub average_wait: Duration,
    /// Wall-clock duration of the whole run
    pub wall_clock: Duration,
}

impl SimReport {
    /// Completed crossings across all classes
    pub fn total_crossings(&self) -> usize {
        self.cars_north + self.cars_south + self.pedestrians
    }
}

/// Count crossings that began while a conflicting class was still on the
/// bridge. One pass over the records sorted by entry time, keeping the
/// latest departure seen per class, finds every overlapping pair.
fn count_conflicted_crossings(records: &[CrossingRecord]) -> usize {
    let mut sorted: Vec<&CrossingRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.entered_at);

    let mut latest_left: HashMap<TrafficClass, Instant> = HashMap::new();
    let mut conflicts = 0;
    for record in sorted {
        let conflicted = latest_left.iter().any(|(&class, &left_at)| {
            class.conflicts_with(record.class) && left_at > record.entered_at
        });
        if conflicted {
            conflicts += 1;
        }
        latest_left
            .entry(record.class)
            .and_modify(|left| *left = (*left).max(record.left_at))
            .or_insert(record.left_at);
    }
    conflicts
}
