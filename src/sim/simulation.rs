//! Simulation context: one track snapshot, one car
//!
//! Owns everything the presentation layer needs a handle to. The track lives
//! behind an `Arc` so regeneration is a snapshot swap: a new track is built
//! completely off to the side, then the reference is replaced; anyone still
//! scanning the old snapshot keeps a consistent mask.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::car::{Car, CarStatus};
use super::sensor::{self, SensorReading};
use crate::config::Config;
use crate::error::{OffTrack, TrackError};
use crate::track::Track;

pub struct Simulation {
    config: Config,
    seed: u64,
    rng: Pcg32,
    track: Arc<Track>,
    car: Car,
}

impl Simulation {
    /// Generate the first track and spawn a car on it
    pub fn new(config: Config, seed: u64) -> Result<Self, TrackError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let track = Arc::new(Track::create(&config.track, &mut rng)?);
        let car = Car::spawn(&track, config.car.clone());
        log::info!(
            "simulation ready: seed {seed}, {} drivable pixels",
            track.mask().population()
        );
        Ok(Self { config, seed, rng, track, car })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current track snapshot; clones of this Arc stay valid across
    /// `regenerate`
    pub fn track(&self) -> Arc<Track> {
        Arc::clone(&self.track)
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    /// Advance the car one tick
    pub fn tick(&mut self) -> CarStatus {
        self.car.tick(self.track.mask())
    }

    /// Drive until the car crashes or `max_ticks` elapse; returns ticks driven
    pub fn run_until_crash(&mut self, max_ticks: u64) -> u64 {
        let mut ticks = 0;
        while ticks < max_ticks {
            if self.tick() == CarStatus::Crashed {
                break;
            }
            ticks += 1;
        }
        ticks
    }

    /// Build a fresh track, swap it in atomically, and respawn the car
    pub fn regenerate(&mut self) -> Result<(), TrackError> {
        let track = Arc::new(Track::create(&self.config.track, &mut self.rng)?);
        self.track = track;
        self.car = Car::spawn(&self.track, self.config.car.clone());
        log::info!(
            "track regenerated: {} drivable pixels",
            self.track.mask().population()
        );
        Ok(())
    }

    /// Diagnostic scan from an arbitrary point with the car's heading
    /// (the probe-point trigger); does not touch the car
    pub fn probe(&self, pos: Vec2) -> Result<SensorReading, OffTrack> {
        sensor::scan(
            self.track.mask(),
            pos,
            self.car.direction_radians,
            &self.config.car.vision_angles,
            self.config.car.vision_distance,
        )
    }
}
