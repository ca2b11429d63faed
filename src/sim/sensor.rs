//! Ray-cast edge sensing against the occupancy mask
//!
//! Rays step one pixel-length at a time from the car's position at a set of
//! relative angles and report how many steps stayed on the track. Scanning
//! only reads the mask, so any number of cars can share one snapshot.

use glam::Vec2;

use crate::error::OffTrack;
use crate::heading_to_dir;
use crate::track::OccupancyGrid;

/// Distance to the track edge along one relative ray angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDistance {
    pub angle_degrees: f32,
    pub distance: u32,
}

/// One full multi-angle scan; entry 0 is always the straight-ahead ray
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    entries: Vec<EdgeDistance>,
}

impl SensorReading {
    pub fn entries(&self) -> &[EdgeDistance] {
        &self.entries
    }

    /// Straight-ahead distance (the controller's primary input)
    pub fn ahead(&self) -> u32 {
        self.entries[0].distance
    }
}

/// Scan the mask from `pos` with the given heading.
///
/// Fails with `OffTrack` before any ray is cast when the rounded position
/// itself is not drivable. Each ray records the unit-step count at which it
/// left the track, capped at `max_distance - 1`; with `max_distance > 1` a
/// ray reports at least 1 even if its first step is already off the mask.
pub fn scan(
    mask: &OccupancyGrid,
    pos: Vec2,
    heading_radians: f32,
    angles_degrees: &[f32],
    max_distance: u32,
) -> Result<SensorReading, OffTrack> {
    if !mask.is_on_track(pos) {
        return Err(OffTrack { x: pos.x, y: pos.y });
    }

    let entries = angles_degrees
        .iter()
        .map(|&angle| EdgeDistance {
            angle_degrees: angle,
            distance: cast_ray(mask, pos, heading_radians + angle.to_radians(), max_distance),
        })
        .collect();

    Ok(SensorReading { entries })
}

fn cast_ray(mask: &OccupancyGrid, pos: Vec2, angle_radians: f32, max_distance: u32) -> u32 {
    let step = heading_to_dir(angle_radians);
    let mut probe = pos;
    let mut distance = 0;

    for i in 1..max_distance {
        distance = i;
        probe += step;
        if !mask.is_on_track(probe) {
            break;
        }
    }
    distance
}
