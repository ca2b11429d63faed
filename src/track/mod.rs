//! Track generation pipeline
//!
//! Grid growth produces a closed polygon, the spline turns it into a dense
//! centerline with a smoothly varying width, and the rasterizer stamps that
//! into the occupancy mask the cars sense against.

pub mod grid;
pub mod raster;
pub mod spline;
pub mod width;

pub use grid::{GridPoint, TrackPolygon};
pub use raster::OccupancyGrid;
pub use spline::{CatmullRomFitter, ParametricCurve, SplineFitter};

use glam::Vec2;
use rand::Rng;

use crate::config::TrackParams;
use crate::error::TrackError;

/// A resampled centerline point with its interpolated width
#[derive(Debug, Clone, Copy)]
pub struct CurvePoint {
    pub pos: Vec2,
    pub width: f32,
}

/// A fully generated track: polygon, dense centerline, occupancy mask
#[derive(Debug)]
pub struct Track {
    params: TrackParams,
    polygon: TrackPolygon,
    centerline: Vec<CurvePoint>,
    mask: OccupancyGrid,
}

impl Track {
    /// Generate a complete track from the shared seeded RNG.
    ///
    /// One-shot batch computation; everything after the return is read-only.
    pub fn create<R: Rng>(params: &TrackParams, rng: &mut R) -> Result<Self, TrackError> {
        Self::create_with(params, &CatmullRomFitter, rng)
    }

    /// Same as `create` but with a caller-supplied curve fitter
    pub fn create_with<R: Rng>(
        params: &TrackParams,
        fitter: &dyn SplineFitter,
        rng: &mut R,
    ) -> Result<Self, TrackError> {
        let polygon = grid::expand(params.rows, params.cols, rng)?;

        // Scale onto pixels and close the loop explicitly for fitting
        let scale = params.square_size as f32;
        let mut scaled: Vec<Vec2> = polygon
            .vertices()
            .iter()
            .map(|v| Vec2::new(v.col as f32 * scale, v.row as f32 * scale))
            .collect();
        scaled.push(scaled[0]);

        let curve = fitter.fit(&scaled)?;
        let samples = curve.sample(params.curve_points());

        let widths = width::profile(
            samples.len(),
            params.width_smooth_window,
            params.width_mapping,
            params.min_width,
            params.max_width,
            rng,
        );

        let centerline: Vec<CurvePoint> = samples
            .into_iter()
            .zip(widths)
            .map(|(pos, width)| CurvePoint { pos, width })
            .collect();

        let mask = raster::rasterize(&centerline, params.pixel_width(), params.pixel_height());
        log::debug!(
            "generated track: {} polygon vertices, {} curve points, {} drivable pixels",
            polygon.len(),
            centerline.len(),
            mask.population()
        );

        Ok(Self {
            params: params.clone(),
            polygon,
            centerline,
            mask,
        })
    }

    pub fn params(&self) -> &TrackParams {
        &self.params
    }

    pub fn polygon(&self) -> &TrackPolygon {
        &self.polygon
    }

    pub fn centerline(&self) -> &[CurvePoint] {
        &self.centerline
    }

    /// The read-only mask cars sense against
    pub fn mask(&self) -> &OccupancyGrid {
        &self.mask
    }

    /// Where a car spawns: the first polygon vertex, scaled to pixels
    pub fn start_position(&self) -> Vec2 {
        let v = self.polygon.vertices()[0];
        let scale = self.params.square_size as f32;
        Vec2::new(v.col as f32 * scale, v.row as f32 * scale)
    }

    /// Initial heading: toward the second polygon vertex
    pub fn initial_direction_radians(&self) -> f32 {
        let a = self.polygon.vertices()[0];
        let b = self.polygon.vertices()[1];
        ((b.row - a.row) as f32).atan2((b.col - a.col) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn default_track(seed: u64) -> Track {
        let mut rng = Pcg32::seed_from_u64(seed);
        Track::create(&TrackParams::default(), &mut rng).unwrap()
    }

    #[test]
    fn test_end_to_end_seeded_generation() {
        // 8x5 grid with 150px cells, fixed seed
        let track = default_track(12345);

        assert!(track.mask().population() > 0);
        assert!(track.mask().is_on_track(track.start_position()));
        assert_eq!(track.centerline().len(), 5 * 8 * 10);
        assert_eq!(track.mask().width(), 8 * 150);
        assert_eq!(track.mask().height(), 5 * 150);
    }

    #[test]
    fn test_centerline_closes() {
        let track = default_track(99);
        let first = track.centerline().first().unwrap().pos;
        let last = track.centerline().last().unwrap().pos;
        assert!(first.distance(last) < 1e-3);
    }

    #[test]
    fn test_widths_within_bounds() {
        let track = default_track(7);
        let params = TrackParams::default();
        for point in track.centerline() {
            assert!(point.width >= params.min_width);
            assert!(point.width <= params.max_width);
        }
    }

    #[test]
    fn test_centerline_points_are_drivable() {
        // Every stamped disk covers its own center
        let track = default_track(21);
        for point in track.centerline() {
            assert!(track.mask().is_on_track(point.pos));
        }
    }

    #[test]
    fn test_distinct_seeds_give_distinct_masks() {
        let a = default_track(1);
        let b = default_track(2);
        assert_ne!(a.mask().population(), b.mask().population());
    }

    #[test]
    fn test_same_seed_reproduces_track() {
        let a = default_track(31337);
        let b = default_track(31337);
        assert_eq!(a.polygon().vertices(), b.polygon().vertices());
        assert_eq!(a.mask().population(), b.mask().population());
        for (pa, pb) in a.centerline().iter().zip(b.centerline()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.width, pb.width);
        }
    }

    #[test]
    fn test_degenerate_params_fail() {
        let params = TrackParams {
            rows: 2,
            cols: 2,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(0);
        assert!(matches!(
            Track::create(&params, &mut rng),
            Err(TrackError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_initial_direction_follows_first_edge() {
        let track = default_track(5);
        let verts = track.polygon().vertices();
        let expected = ((verts[1].row - verts[0].row) as f32)
            .atan2((verts[1].col - verts[0].col) as f32);
        assert_eq!(track.initial_direction_radians(), expected);
    }
}
