//! Raceline - procedural race tracks with a reactive driver
//!
//! Core modules:
//! - `track`: Track generation (grid growth, spline smoothing, rasterization)
//! - `sim`: Deterministic driving simulation (sensing, control, context)
//! - `config`: Data-driven tunables for generation and driving
//! - `error`: Typed error taxonomy

pub mod config;
pub mod error;
pub mod sim;
pub mod track;

pub use config::{CarTuning, Config, TrackParams, WidthMapping};
pub use error::{OffTrack, TrackError};
pub use sim::{Car, CarStatus, SensorReading, Simulation};
pub use track::{CurvePoint, GridPoint, OccupancyGrid, Track, TrackPolygon};

use glam::Vec2;

/// Default generation/driving constants
pub mod consts {
    /// Pixel size of one grid cell
    pub const SQUARE_SIZE: u32 = 150;
    /// Grid rows
    pub const ROWS: u32 = 5;
    /// Grid columns
    pub const COLS: u32 = 8;

    /// Narrowest drivable track radius (pixels)
    pub const TRACK_MIN_WIDTH: f32 = 20.0;
    /// Widest drivable track radius (pixels)
    pub const TRACK_MAX_WIDTH: f32 = 40.0;
    /// Resampled curve points per grid cell
    pub const CURVE_POINTS_PER_CELL: u32 = 10;
    /// Moving-average window for the width profile
    pub const WIDTH_SMOOTH_WINDOW: usize = 20;

    /// How far a car can see; needs to exceed the maximum track width
    pub const CAR_VISION_DISTANCE: u32 = 2 * SQUARE_SIZE;
    /// Relative ray angles in degrees; straight ahead must come first
    pub const CAR_VISION_ANGLES: [f32; 7] = [0.0, -20.0, 20.0, -45.0, 45.0, -90.0, 90.0];
    /// Speed bounds in pixels per tick
    pub const CAR_SPEED_MIN: f32 = 3.0;
    pub const CAR_SPEED_MAX: f32 = 10.0;
    /// Acceleration bounds in pixels per tick squared
    pub const CAR_ACCELERATION_MIN: f32 = -2.0;
    pub const CAR_ACCELERATION_MAX: f32 = 2.0;
    /// Divisor weighting steering contributions by sensor angle
    pub const CAR_STEERING_DIVISOR: f32 = 30.0;
    /// Fraction of vision distance below which the car starts steering
    pub const CAR_BRAKE_THRESHOLD: f32 = 0.5;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit direction vector for a heading in radians
#[inline]
pub fn heading_to_dir(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}
