//! Periodic interpolating curve through the scaled polygon
//!
//! The fitter is a seam: anything that can produce a periodic parametric
//! curve through a closed point loop will do. The default implementation is a
//! periodic cubic Hermite with Catmull-Rom tangents over chord-length knots,
//! which passes through every input point and closes C1.

use glam::Vec2;

use crate::error::TrackError;

/// Parametric closed curve over u in [0, 1], with eval(0) == eval(1)
pub trait ParametricCurve {
    fn eval(&self, u: f32) -> Vec2;

    /// Sample n uniformly spaced parameters spanning [0, 1] inclusive, so the
    /// returned loop closes exactly (last point == first point)
    fn sample(&self, n: usize) -> Vec<Vec2> {
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![self.eval(0.0)];
        }
        (0..n)
            .map(|k| self.eval(k as f32 / (n - 1) as f32))
            .collect()
    }
}

/// Fits a periodic curve through a closed point loop (first point repeated
/// at the end)
pub trait SplineFitter {
    fn fit(&self, closed_points: &[Vec2]) -> Result<Box<dyn ParametricCurve>, TrackError>;
}

/// Periodic Catmull-Rom spline with normalized chord-length knots
pub struct PeriodicCatmullRom {
    /// Control points, one loop, no duplicate closing point
    points: Vec<Vec2>,
    /// knots[i] is the parameter of points[i]; knots[n] == 1.0 closes the loop
    knots: Vec<f32>,
}

impl PeriodicCatmullRom {
    /// Build from a closed loop: the last point must repeat the first.
    /// Consecutive duplicates are dropped; at least 4 distinct non-collinear
    /// points must remain.
    pub fn fit(closed_points: &[Vec2]) -> Result<Self, TrackError> {
        let mut points: Vec<Vec2> = Vec::with_capacity(closed_points.len());
        for &p in closed_points {
            if points.last().is_none_or(|&q| p.distance_squared(q) > 1e-12) {
                points.push(p);
            }
        }
        // Drop the explicit closing point; periodicity is implied
        if let [first, .., last] = points[..]
            && first.distance_squared(last) <= 1e-12
        {
            points.pop();
        }

        if points.len() < 4 {
            return Err(TrackError::SplineFit(format!(
                "need at least 4 distinct points, got {}",
                points.len()
            )));
        }
        if is_collinear(&points) {
            return Err(TrackError::SplineFit(
                "points are collinear, no closed curve exists".into(),
            ));
        }

        let n = points.len();
        let mut knots = Vec::with_capacity(n + 1);
        knots.push(0.0f32);
        let mut total = 0.0f32;
        for i in 0..n {
            total += points[i].distance(points[(i + 1) % n]);
            knots.push(total);
        }
        for k in &mut knots {
            *k /= total;
        }
        knots[n] = 1.0;

        Ok(Self { points, knots })
    }

    /// Catmull-Rom tangent at control point i (cyclic finite difference)
    fn tangent(&self, i: usize) -> Vec2 {
        let n = self.points.len();
        let prev = (i + n - 1) % n;
        let next = (i + 1) % n;
        let h_prev = self.knots[prev + 1] - self.knots[prev];
        let h_here = self.knots[i + 1] - self.knots[i];
        (self.points[next] - self.points[prev]) / (h_prev + h_here)
    }
}

impl ParametricCurve for PeriodicCatmullRom {
    fn eval(&self, u: f32) -> Vec2 {
        let n = self.points.len();
        let u = u.rem_euclid(1.0);

        // knots are sorted and finite; find the segment containing u
        let seg = match self
            .knots
            .binary_search_by(|k| k.partial_cmp(&u).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i.min(n - 1),
            Err(i) => i - 1,
        };

        let h = self.knots[seg + 1] - self.knots[seg];
        let t = (u - self.knots[seg]) / h;

        let p0 = self.points[seg];
        let p1 = self.points[(seg + 1) % n];
        let m0 = self.tangent(seg);
        let m1 = self.tangent((seg + 1) % n);

        let t2 = t * t;
        let t3 = t2 * t;
        p0 * (2.0 * t3 - 3.0 * t2 + 1.0)
            + m0 * (h * (t3 - 2.0 * t2 + t))
            + p1 * (-2.0 * t3 + 3.0 * t2)
            + m1 * (h * (t3 - t2))
    }
}

/// Default fitter used by track creation
pub struct CatmullRomFitter;

impl SplineFitter for CatmullRomFitter {
    fn fit(&self, closed_points: &[Vec2]) -> Result<Box<dyn ParametricCurve>, TrackError> {
        Ok(Box::new(PeriodicCatmullRom::fit(closed_points)?))
    }
}

fn is_collinear(points: &[Vec2]) -> bool {
    let a = points[0];
    let dir = points[1] - a;
    points[2..]
        .iter()
        .all(|&p| dir.perp_dot(p - a).abs() < 1e-6)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_loop(scale: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(scale, 0.0),
            Vec2::new(scale, scale),
            Vec2::new(0.0, scale),
            Vec2::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_interpolates_control_points() {
        let pts = unit_square_loop(150.0);
        let spline = PeriodicCatmullRom::fit(&pts).unwrap();
        for (i, &p) in pts[..4].iter().enumerate() {
            let u = spline.knots[i];
            assert!(spline.eval(u).distance(p) < 1e-3, "point {i} not hit");
        }
    }

    #[test]
    fn test_closed_loop_continuity() {
        let spline = PeriodicCatmullRom::fit(&unit_square_loop(150.0)).unwrap();
        assert!(spline.eval(0.0).distance(spline.eval(1.0)) < 1e-3);
    }

    #[test]
    fn test_sample_closes_exactly() {
        let spline = PeriodicCatmullRom::fit(&unit_square_loop(150.0)).unwrap();
        let samples = spline.sample(400);
        assert_eq!(samples.len(), 400);
        assert!(samples[0].distance(samples[399]) < 1e-3);
    }

    #[test]
    fn test_too_few_points_rejected() {
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 0.0),
        ];
        assert!(matches!(
            PeriodicCatmullRom::fit(&pts),
            Err(TrackError::SplineFit(_))
        ));
    }

    #[test]
    fn test_collinear_points_rejected() {
        let pts: Vec<Vec2> = (0..5).map(|i| Vec2::new(i as f32, 0.0)).collect();
        assert!(matches!(
            PeriodicCatmullRom::fit(&pts),
            Err(TrackError::SplineFit(_))
        ));
    }

    #[test]
    fn test_duplicate_consecutive_points_collapsed() {
        let mut pts = unit_square_loop(10.0);
        pts.insert(2, pts[1]);
        let spline = PeriodicCatmullRom::fit(&pts).unwrap();
        assert_eq!(spline.points.len(), 4);
    }
}
