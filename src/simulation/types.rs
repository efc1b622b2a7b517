//! Core types for the bridge simulation
//!
//! These are standalone types shared by the monitor, the occupant
//! workflows, and the crossing statistics.

use std::fmt;

/// Travel direction of a car crossing the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// The opposing car stream
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }

    /// Lowercase label used in log lines
    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the three traffic classes competing for the one-lane bridge.
///
/// The fairness token kept by the monitor ranges over the same three
/// values: it names the waiting class currently privileged to enter
/// ahead of its rivals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficClass {
    NorthCars,
    SouthCars,
    Pedestrians,
}

impl TrafficClass {
    /// The class a car heading `direction` belongs to
    pub fn cars(direction: Direction) -> TrafficClass {
        match direction {
            Direction::North => TrafficClass::NorthCars,
            Direction::South => TrafficClass::SouthCars,
        }
    }

    /// The two classes this class may never share the bridge with.
    ///
    /// The order is the hand-off priority used when this class departs:
    /// cars yield to the opposing car stream before pedestrians, and
    /// pedestrians yield to north cars before south cars.
    pub fn rivals(self) -> [TrafficClass; 2] {
        match self {
            TrafficClass::NorthCars => [TrafficClass::SouthCars, TrafficClass::Pedestrians],
            TrafficClass::SouthCars => [TrafficClass::NorthCars, TrafficClass::Pedestrians],
            TrafficClass::Pedestrians => [TrafficClass::NorthCars, TrafficClass::SouthCars],
        }
    }

    /// Whether two classes are forbidden from sharing the bridge
    pub fn conflicts_with(self, other: TrafficClass) -> bool {
        self != other
    }

    /// Lowercase label used in log lines
    pub fn label(self) -> &'static str {
        match self {
            TrafficClass::NorthCars => "north-cars",
            TrafficClass::SouthCars => "south-cars",
            TrafficClass::Pedestrians => "pedestrians",
        }
    }
}

impl fmt::Display for TrafficClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A unique identifier for a car within its direction's stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarId(pub u32);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a pedestrian
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PedestrianId(pub u32);

impl fmt::Display for PedestrianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
