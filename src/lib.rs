//! Bridge Crossing Simulation Library
//!
//! A one-lane bridge is shared by north-bound cars, south-bound cars, and
//! pedestrians. The monitor in [`simulation`] keeps rival classes off the
//! span at the same time without starving anyone; the rest of the module
//! generates traffic and reports crossing statistics.

pub mod simulation;
