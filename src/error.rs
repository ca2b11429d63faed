//! Typed errors for track generation and sensing

use thiserror::Error;

/// Track generation failures, surfaced from `Track::create`
#[derive(Debug, Error)]
pub enum TrackError {
    /// Grid too small to place the seed square with a one-cell border margin
    #[error("grid {rows}x{cols} too small for a track (need at least 3x3)")]
    Degenerate { rows: u32, cols: u32 },

    /// Degenerate input to the spline fitter
    #[error("spline fit failed: {0}")]
    SplineFit(String),
}

/// Sensor precondition failure: the queried position is not on the track.
///
/// Consumed by the car as its crash transition, never treated as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("position ({x}, {y}) is off the track")]
pub struct OffTrack {
    pub x: f32,
    pub y: f32,
}
