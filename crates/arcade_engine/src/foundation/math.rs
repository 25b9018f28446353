//! Math utilities and types
//!
//! Provides the 2D vector and rectangle primitives used by the integrator and
//! the spatial index.

pub use nalgebra::{Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Magnitudes below this are treated as zero by [`Vec2Ext::normalize_or_self`]
pub const NORMALIZE_EPSILON: f32 = 1e-4;

/// Unit vector pointing along +X
pub fn unit_right() -> Vec2 {
    Vec2::x()
}

/// Extension trait for [`Vec2`] with the operations the game relies on
pub trait Vec2Ext {
    /// Rotate by `angle` radians (right-handed, `x' = x cos - y sin`, `y' = x sin + y cos`)
    fn rotated(&self, angle: f32) -> Vec2;

    /// Normalize, or return the vector unchanged when its magnitude is below
    /// [`NORMALIZE_EPSILON`]
    fn normalize_or_self(&self) -> Vec2;

    /// Rescale to exactly `max` when longer than `max`, keeping direction
    fn clamp_magnitude(&self, max: f32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    fn rotated(&self, angle: f32) -> Vec2 {
        Rotation2::new(angle) * *self
    }

    fn normalize_or_self(&self) -> Vec2 {
        let magnitude = self.magnitude();
        if magnitude < NORMALIZE_EPSILON {
            *self
        } else {
            *self / magnitude
        }
    }

    fn clamp_magnitude(&self, max: f32) -> Vec2 {
        if self.magnitude() > max {
            self.normalize_or_self() * max
        } else {
            *self
        }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rectangle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl Rectangle {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half-open containment: `[x, x + width) x [y, y + height)`.
    ///
    /// Points on a shared edge between two adjacent rectangles belong to
    /// exactly one of them.
    pub fn contains(&self, point: &Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Overlap test with exclusive boundaries; rectangles that merely touch
    /// do not intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Split into four quadrants at the center.
    ///
    /// Order: top-left, top-right, bottom-left, bottom-right. The far-side
    /// extents are measured from the midpoint to this rectangle's own edges,
    /// so the quadrants tile the parent exactly.
    pub fn quadrants(&self) -> [Rectangle; 4] {
        let mid = self.center();
        let near_width = mid.x - self.x;
        let near_height = mid.y - self.y;
        let far_width = self.right() - mid.x;
        let far_height = self.bottom() - mid.y;

        [
            Rectangle::new(self.x, self.y, near_width, near_height),
            Rectangle::new(mid.x, self.y, far_width, near_height),
            Rectangle::new(self.x, mid.y, near_width, far_height),
            Rectangle::new(mid.x, mid.y, far_width, far_height),
        ]
    }

    /// Index into [`Rectangle::quadrants`] for a point inside this rectangle
    pub fn quadrant_index(&self, point: &Vec2) -> usize {
        let mid = self.center();
        let x_bit = usize::from(point.x >= mid.x);
        let y_bit = usize::from(point.y >= mid.y);
        (y_bit << 1) | x_bit
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = std::f32::consts::TAU;
}

/// Wrap an angle into `[0, 2π)`
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(constants::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= constants::TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = unit_right().rotated(constants::PI / 2.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_below_epsilon_is_noop() {
        let tiny = Vec2::new(1e-5, 0.0);
        assert_eq!(tiny.normalize_or_self(), tiny);

        let zero = Vec2::zeros();
        let normalized = zero.normalize_or_self();
        assert!(!normalized.x.is_nan());
        assert_eq!(normalized, zero);
    }

    #[test]
    fn test_normalize_regular_vector() {
        let v = Vec2::new(3.0, 4.0).normalize_or_self();
        assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.x, 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_clamp_magnitude() {
        let v = Vec2::new(30.0, 40.0).clamp_magnitude(5.0);
        assert_relative_eq!(v.magnitude(), 5.0, epsilon = 1e-5);
        assert_relative_eq!(v.x, 3.0, epsilon = 1e-5);

        let short = Vec2::new(1.0, 1.0);
        assert_eq!(short.clamp_magnitude(5.0), short);
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(&Vec2::new(0.0, 0.0)));
        assert!(rect.contains(&Vec2::new(9.999, 9.999)));
        assert!(!rect.contains(&Vec2::new(10.0, 5.0)));
        assert!(!rect.contains(&Vec2::new(5.0, 10.0)));
        assert!(!rect.contains(&Vec2::new(-0.001, 5.0)));
    }

    #[test]
    fn test_intersects_excludes_touching_edges() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(10.0, 0.0, 10.0, 10.0);
        let c = Rectangle::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(c.intersects(&b));
    }

    #[test]
    fn test_quadrants_tile_parent() {
        let rect = Rectangle::new(10.0, 20.0, 30.0, 50.0);
        let quads = rect.quadrants();

        assert_eq!(quads[0], Rectangle::new(10.0, 20.0, 15.0, 25.0));
        assert_eq!(quads[1], Rectangle::new(25.0, 20.0, 15.0, 25.0));
        assert_eq!(quads[2], Rectangle::new(10.0, 45.0, 15.0, 25.0));
        assert_eq!(quads[3], Rectangle::new(25.0, 45.0, 15.0, 25.0));

        let area: f32 = quads.iter().map(|q| q.width * q.height).sum();
        assert_relative_eq!(area, rect.width * rect.height);
        assert_relative_eq!(quads[3].right(), rect.right());
        assert_relative_eq!(quads[3].bottom(), rect.bottom());
    }

    #[test]
    fn test_quadrant_index_matches_contains() {
        let rect = Rectangle::new(0.0, 0.0, 20.0, 20.0);
        let quads = rect.quadrants();
        for point in [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(9.99, 19.0),
            Vec2::new(19.9, 19.9),
        ] {
            let index = rect.quadrant_index(&point);
            assert!(quads[index].contains(&point), "{point:?} not in quadrant {index}");
        }
    }

    #[test]
    fn test_wrap_angle() {
        use constants::TAU;
        assert_relative_eq!(wrap_angle(TAU + 1.0), 1.0, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(-1.0), TAU - 1.0, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(7.0 * TAU + 0.5), 0.5, epsilon = 1e-4);
        assert_eq!(wrap_angle(TAU), 0.0);
        let tiny = wrap_angle(-1e-9);
        assert!((0.0..TAU).contains(&tiny));
    }
}
