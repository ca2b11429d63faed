//! Generation and driving tunables
//!
//! Everything that shapes a track or the driving heuristic lives here so runs
//! can be described by (config, seed) pairs.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the normalized width profile maps into pixel radii
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WidthMapping {
    /// Affine map onto [min_width, max_width]
    #[default]
    MinToMax,
    /// Historical variant: [min_width, 2 * min_width]
    MinToDouble,
}

impl WidthMapping {
    /// Map a normalized value in [0, 1] to a track radius in pixels
    pub fn apply(&self, t: f32, min_width: f32, max_width: f32) -> f32 {
        match self {
            WidthMapping::MinToMax => min_width + (max_width - min_width) * t,
            WidthMapping::MinToDouble => min_width + min_width * t,
        }
    }
}

/// Track generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackParams {
    /// Grid rows (cells, not vertices)
    pub rows: u32,
    /// Grid columns (cells, not vertices)
    pub cols: u32,
    /// Pixel size of one grid cell
    pub square_size: u32,
    /// Narrowest track radius in pixels
    pub min_width: f32,
    /// Widest track radius in pixels
    pub max_width: f32,
    /// Resampled centerline points per grid cell
    pub curve_points_per_cell: u32,
    /// Moving-average window for the width profile
    pub width_smooth_window: usize,
    /// Width mapping variant
    pub width_mapping: WidthMapping,
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            square_size: SQUARE_SIZE,
            min_width: TRACK_MIN_WIDTH,
            max_width: TRACK_MAX_WIDTH,
            curve_points_per_cell: CURVE_POINTS_PER_CELL,
            width_smooth_window: WIDTH_SMOOTH_WINDOW,
            width_mapping: WidthMapping::default(),
        }
    }
}

impl TrackParams {
    /// Total resampled centerline points for one loop
    pub fn curve_points(&self) -> usize {
        (self.rows * self.cols * self.curve_points_per_cell) as usize
    }

    /// Mask width in pixels
    pub fn pixel_width(&self) -> usize {
        (self.cols * self.square_size) as usize
    }

    /// Mask height in pixels
    pub fn pixel_height(&self) -> usize {
        (self.rows * self.square_size) as usize
    }
}

/// Driving heuristic tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarTuning {
    /// Maximum ray length in pixels
    pub vision_distance: u32,
    /// Relative ray angles in degrees; angle 0 must come first
    pub vision_angles: Vec<f32>,
    /// Speed bounds in pixels per tick
    pub speed_min: f32,
    pub speed_max: f32,
    /// Acceleration bounds in pixels per tick squared
    pub accel_min: f32,
    pub accel_max: f32,
    /// Divisor weighting steering contributions by sensor angle
    pub steering_divisor: f32,
    /// Fraction of vision distance below which steering kicks in
    pub brake_threshold: f32,
    /// Historical variant: multiply the heading delta by current speed
    pub scale_steering_by_speed: bool,
}

impl Default for CarTuning {
    fn default() -> Self {
        Self {
            vision_distance: CAR_VISION_DISTANCE,
            vision_angles: CAR_VISION_ANGLES.to_vec(),
            speed_min: CAR_SPEED_MIN,
            speed_max: CAR_SPEED_MAX,
            accel_min: CAR_ACCELERATION_MIN,
            accel_max: CAR_ACCELERATION_MAX,
            steering_divisor: CAR_STEERING_DIVISOR,
            brake_threshold: CAR_BRAKE_THRESHOLD,
            scale_steering_by_speed: false,
        }
    }
}

impl CarTuning {
    /// Heading delta multiplier for a given speed
    pub fn steering_gain(&self, speed: f32) -> f32 {
        if self.scale_steering_by_speed { speed } else { 1.0 }
    }
}

/// Combined simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub track: TrackParams,
    pub car: CarTuning,
}

impl Config {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
