//! Deterministic driving simulation
//!
//! All per-tick logic lives here and must stay pure and deterministic:
//! - Seeded RNG only, shared with track generation
//! - Sensing reads the mask, never mutates it
//! - One strict sense-then-mutate sequence per tick

pub mod car;
pub mod sensor;
pub mod simulation;

pub use car::{Car, CarStatus};
pub use sensor::{EdgeDistance, SensorReading, scan};
pub use simulation::Simulation;
