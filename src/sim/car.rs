//! Reactive car controller
//!
//! A fixed heuristic, not a trained model: accelerate on open road ahead,
//! brake and steer toward the side with more room when a corner closes in.
//! Two states, Driving and Crashed; Crashed is terminal.

use glam::Vec2;

use super::sensor;
use crate::config::CarTuning;
use crate::{heading_to_dir, normalize_angle};
use crate::track::{OccupancyGrid, Track};

/// Controller state after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarStatus {
    Driving,
    Crashed,
}

/// Kinematic state plus the tuning that drives it; single owner, mutated
/// once per tick
#[derive(Debug, Clone)]
pub struct Car {
    pub pos: Vec2,
    pub direction_radians: f32,
    pub speed: f32,
    pub steering_radians: f32,
    pub crashed: bool,
    tuning: CarTuning,
}

impl Car {
    /// Spawn at the track's start vertex, heading along its first edge.
    ///
    /// Initial speed is below the driving minimum; the first tick clamps it
    /// up into range.
    pub fn spawn(track: &Track, tuning: CarTuning) -> Self {
        Self {
            pos: track.start_position(),
            direction_radians: track.initial_direction_radians(),
            speed: track.params().square_size as f32 / 50.0,
            steering_radians: 0.0,
            crashed: false,
            tuning,
        }
    }

    /// Place a car at an arbitrary position/heading (tests and diagnostics)
    pub fn at(pos: Vec2, direction_radians: f32, speed: f32, tuning: CarTuning) -> Self {
        Self {
            pos,
            direction_radians,
            speed,
            steering_radians: 0.0,
            crashed: false,
            tuning,
        }
    }

    pub fn status(&self) -> CarStatus {
        if self.crashed { CarStatus::Crashed } else { CarStatus::Driving }
    }

    pub fn tuning(&self) -> &CarTuning {
        &self.tuning
    }

    /// One sense-then-steer step.
    ///
    /// A failed scan crashes the car permanently with no kinematic update;
    /// ticking a crashed car is a no-op.
    pub fn tick(&mut self, mask: &OccupancyGrid) -> CarStatus {
        if self.crashed {
            return CarStatus::Crashed;
        }

        let reading = match sensor::scan(
            mask,
            self.pos,
            self.direction_radians,
            &self.tuning.vision_angles,
            self.tuning.vision_distance,
        ) {
            Ok(reading) => reading,
            Err(off) => {
                log::debug!("crashed at ({:.1}, {:.1})", off.x, off.y);
                self.crashed = true;
                return CarStatus::Crashed;
            }
        };

        let vision = self.tuning.vision_distance as f32;
        let ahead = reading.ahead() as f32;

        // Accelerate toward open road, brake toward walls
        let delta =
            (4.0 * (ahead / vision) - 2.0).clamp(self.tuning.accel_min, self.tuning.accel_max);
        self.speed = (self.speed + delta).clamp(self.tuning.speed_min, self.tuning.speed_max);

        // Steer only when a corner is closing in; each side ray pulls the
        // heading toward itself, weighted down by how sharp its angle is
        let mut steering = 0.0;
        if ahead < self.tuning.brake_threshold * vision {
            for entry in reading.entries() {
                if entry.angle_degrees == 0.0 {
                    continue;
                }
                steering +=
                    entry.distance as f32 / (self.tuning.steering_divisor * entry.angle_degrees);
            }
        }
        self.steering_radians = steering;
        self.direction_radians = normalize_angle(
            self.direction_radians + steering * self.tuning.steering_gain(self.speed),
        );

        self.pos += self.speed * heading_to_dir(self.direction_radians);
        CarStatus::Driving
    }
}
