//! Occupancy mask and disk-stamping rasterizer
//!
//! The curve becomes drivable pixels by stamping one filled disk per
//! centerline point. Disk radius is the point's full width value, so
//! consecutive stamps always overlap and the union stays connected.

use glam::Vec2;

use super::CurvePoint;

/// Dense boolean mask over pixel space; true = drivable.
///
/// Built wholesale per track and read-only afterward, so shared references
/// can be scanned from any number of cars at once.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// All-false mask of the given pixel dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, false)
    }

    /// Uniform mask, handy for synthetic sensing setups
    pub fn filled(width: usize, height: usize, value: bool) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    fn set(&mut self, x: i64, y: i64) {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            self.cells[y as usize * self.width + x as usize] = true;
        }
    }

    /// Whether the nearest pixel to a float position is drivable.
    ///
    /// Rounds with `f32::round`, the same convention the sensor uses when it
    /// steps along a ray; out of bounds is off-track.
    pub fn is_on_track(&self, pos: Vec2) -> bool {
        self.get(pos.x.round() as i64, pos.y.round() as i64)
    }

    /// Mark every pixel within `radius` of the rounded center as drivable
    pub fn stamp_disk(&mut self, center: Vec2, radius: f32) {
        let cx = center.x.round() as i64;
        let cy = center.y.round() as i64;
        let r = radius.max(0.0);
        let reach = r.ceil() as i64;
        let r2 = r * r;

        for y in (cy - reach)..=(cy + reach) {
            for x in (cx - reach)..=(cx + reach) {
                let dx = (x - cx) as f32;
                let dy = (y - cy) as f32;
                if dx * dx + dy * dy <= r2 {
                    self.set(x, y);
                }
            }
        }
    }

    /// Number of drivable pixels
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Stamp the whole centerline into a fresh mask
pub fn rasterize(centerline: &[CurvePoint], width: usize, height: usize) -> OccupancyGrid {
    let mut mask = OccupancyGrid::new(width, height);
    for point in centerline {
        mask.stamp_disk(point.pos, point.width);
    }
    mask
}
