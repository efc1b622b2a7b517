//! The bridge monitor
//!
//! A single mutex guards the six occupancy counters and the fairness
//! token. Each class parks on its own condition variable, so a departure
//! can wake exactly the class the turn was handed to and nothing else.

use parking_lot::{Condvar, Mutex};
use std::fmt;

use super::types::{Direction, TrafficClass};

/// Counters and the fairness token, only ever touched under the lock
#[derive(Debug)]
struct BridgeState {
    on_bridge_north: u32,
    on_bridge_south: u32,
    on_bridge_peds: u32,
    waiting_north: u32,
    waiting_south: u32,
    waiting_peds: u32,
    /// Which waiting class is currently privileged to enter. Written
    /// only on departure, never on entry.
    turn: TrafficClass,
}

impl BridgeState {
    fn new() -> Self {
        Self {
            on_bridge_north: 0,
            on_bridge_south: 0,
            on_bridge_peds: 0,
            waiting_north: 0,
            waiting_south: 0,
            waiting_peds: 0,
            turn: TrafficClass::NorthCars,
        }
    }

    fn on_bridge(&self, class: TrafficClass) -> u32 {
        match class {
            TrafficClass::NorthCars => self.on_bridge_north,
            TrafficClass::SouthCars => self.on_bridge_south,
            TrafficClass::Pedestrians => self.on_bridge_peds,
        }
    }

    fn on_bridge_mut(&mut self, class: TrafficClass) -> &mut u32 {
        match class {
            TrafficClass::NorthCars => &mut self.on_bridge_north,
            TrafficClass::SouthCars => &mut self.on_bridge_south,
            TrafficClass::Pedestrians => &mut self.on_bridge_peds,
        }
    }

    fn waiting(&self, class: TrafficClass) -> u32 {
        match class {
            TrafficClass::NorthCars => self.waiting_north,
            TrafficClass::SouthCars => self.waiting_south,
            TrafficClass::Pedestrians => self.waiting_peds,
        }
    }

    fn waiting_mut(&mut self, class: TrafficClass) -> &mut u32 {
        match class {
            TrafficClass::NorthCars => &mut self.waiting_north,
            TrafficClass::SouthCars => &mut self.waiting_south,
            TrafficClass::Pedestrians => &mut self.waiting_peds,
        }
    }

    /// Entry predicate for `class`: the bridge holds no rival, and either
    /// the turn names this class or no rival is waiting at all.
    fn can_enter(&self, class: TrafficClass) -> bool {
        let [first, second] = class.rivals();
        self.on_bridge(first) == 0
            && self.on_bridge(second) == 0
            && (self.turn == class || (self.waiting(first) == 0 && self.waiting(second) == 0))
    }
}

/// A consistent copy of the monitor state, taken under the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeSnapshot {
    /// Cars on the bridge heading north
    pub cars_north: u32,
    /// Cars on the bridge heading south
    pub cars_south: u32,
    /// Pedestrians on the bridge
    pub pedestrians: u32,
    /// Cars blocked at the entrance heading north
    pub waiting_north: u32,
    /// Cars blocked at the entrance heading south
    pub waiting_south: u32,
    /// Pedestrians blocked at the entrance
    pub waiting_pedestrians: u32,
    /// The fairness token at the time of the snapshot
    pub turn: TrafficClass,
}

impl BridgeSnapshot {
    /// Occupants of `class` currently on the span
    pub fn on_bridge(&self, class: TrafficClass) -> u32 {
        match class {
            TrafficClass::NorthCars => self.cars_north,
            TrafficClass::SouthCars => self.cars_south,
            TrafficClass::Pedestrians => self.pedestrians,
        }
    }

    /// Occupants of `class` currently blocked at an entrance
    pub fn waiting(&self, class: TrafficClass) -> u32 {
        match class {
            TrafficClass::NorthCars => self.waiting_north,
            TrafficClass::SouthCars => self.waiting_south,
            TrafficClass::Pedestrians => self.waiting_pedestrians,
        }
    }

    /// Total occupants on the span
    pub fn total_on_bridge(&self) -> u32 {
        self.cars_north + self.cars_south + self.pedestrians
    }

    /// Total occupants blocked at either entrance
    pub fn total_waiting(&self) -> u32 {
        self.waiting_north + self.waiting_south + self.waiting_pedestrians
    }

    /// How many distinct classes occupy the span. Any value above one is
    /// a mutual exclusion violation.
    pub fn occupied_classes(&self) -> usize {
        [self.cars_north, self.cars_south, self.pedestrians]
            .iter()
            .filter(|&&count| count > 0)
            .count()
    }
}

impl fmt::Display for BridgeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bridge<cn:{} cs:{} p:{} | wn:{} ws:{} wp:{} | turn:{}>",
            self.cars_north,
            self.cars_south,
            self.pedestrians,
            self.waiting_north,
            self.waiting_south,
            self.waiting_pedestrians,
            self.turn,
        )
    }
}

/// Serializes access to the one-lane bridge.
///
/// Entry is a guarded wait: register as waiting, sleep until the class
/// predicate holds, then move from waiting to on-bridge without dropping
/// the lock in between. Departure decrements the on-bridge count, hands
/// the turn to the highest-priority rival with waiters, and broadcasts to
/// that rival once the departing class has fully drained. Waiters re-check
/// their predicate on every wake-up, so a broadcast admits every
/// compatible waiter and leaves the rest parked.
///
/// Entry blocks indefinitely; there is no timeout and no cancellation. A
/// caller that entered must eventually report its departure.
#[derive(Debug)]
pub struct BridgeMonitor {
    state: Mutex<BridgeState>,
    north_entry: Condvar,
    south_entry: Condvar,
    pedestrian_entry: Condvar,
}

impl BridgeMonitor {
    /// Create an empty bridge. The turn starts at north cars; it is a
    /// placeholder until the first departure reassigns it.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BridgeState::new()),
            north_entry: Condvar::new(),
            south_entry: Condvar::new(),
            pedestrian_entry: Condvar::new(),
        }
    }

    /// Block until a car heading `direction` may enter, then enter
    pub fn wants_enter_car(&self, direction: Direction) {
        self.enter(TrafficClass::cars(direction));
    }

    /// Report a car heading `direction` leaving the bridge
    pub fn leaves_car(&self, direction: Direction) {
        self.depart(TrafficClass::cars(direction));
    }

    /// Block until a pedestrian may enter, then enter
    pub fn wants_enter_pedestrian(&self) {
        self.enter(TrafficClass::Pedestrians);
    }

    /// Report a pedestrian leaving the bridge
    pub fn leaves_pedestrian(&self) {
        self.depart(TrafficClass::Pedestrians);
    }

    /// A consistent copy of the counters and the turn
    pub fn snapshot(&self) -> BridgeSnapshot {
        let state = self.state.lock();
        BridgeSnapshot {
            cars_north: state.on_bridge_north,
            cars_south: state.on_bridge_south,
            pedestrians: state.on_bridge_peds,
            waiting_north: state.waiting_north,
            waiting_south: state.waiting_south,
            waiting_pedestrians: state.waiting_peds,
            turn: state.turn,
        }
    }

    fn entry_for(&self, class: TrafficClass) -> &Condvar {
        match class {
            TrafficClass::NorthCars => &self.north_entry,
            TrafficClass::SouthCars => &self.south_entry,
            TrafficClass::Pedestrians => &self.pedestrian_entry,
        }
    }

    fn enter(&self, class: TrafficClass) {
        let mut state = self.state.lock();
        *state.waiting_mut(class) += 1;
        while !state.can_enter(class) {
            self.entry_for(class).wait(&mut state);
        }
        // Still inside the critical section: the transition from waiting
        // to on-bridge is atomic with the predicate check above.
        *state.waiting_mut(class) -= 1;
        *state.on_bridge_mut(class) += 1;
    }

    fn depart(&self, class: TrafficClass) {
        let mut state = self.state.lock();
        *state.on_bridge_mut(class) -= 1;

        let handoff = class
            .rivals()
            .into_iter()
            .find(|&rival| state.waiting(rival) > 0);

        match handoff {
            Some(rival) => {
                state.turn = rival;
                // Wake the rival only once the span has drained of this
                // class; earlier wake-ups would fail the predicate anyway.
                if state.on_bridge(class) == 0 {
                    self.entry_for(rival).notify_all();
                }
            }
            // Nobody is waiting. Park the turn on the departing class so
            // a later arrival of any class can enter opportunistically.
            None => state.turn = class,
        }
    }
}

impl Default for BridgeMonitor {
    fn default() -> Self {
        Self::new()
    }
}
