use crate::geometry::geo_traits::{CollidesWith, Shape};
use crate::geometry::primitives::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle on the integer grid.
/// `x_max` and `y_max` are exclusive: a rectangle at `(x, y)` of size `w × h` spans `[x, x + w) × [y, y + h)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: u64,
    pub y_min: u64,
    pub x_max: u64,
    pub y_max: u64,
}

impl Rect {
    /// Rectangle with its top-left corner at `(x, y)` and the given (positive) size.
    #[inline(always)]
    pub fn from_corner(x: u32, y: u32, width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "degenerate rectangle {width}x{height}");
        let (x, y) = (x as u64, y as u64);
        Rect {
            x_min: x,
            y_min: y,
            x_max: x + width as u64,
            y_max: y + height as u64,
        }
    }

    /// True if `self` lies entirely within `other`, shared edges included.
    #[inline(always)]
    pub fn fits_inside(&self, other: &Rect) -> bool {
        self.x_min >= other.x_min
            && self.y_min >= other.y_min
            && self.x_max <= other.x_max
            && self.y_max <= other.y_max
    }

    pub fn width(&self) -> u64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> u64 {
        self.y_max - self.y_min
    }
}

impl Shape for Rect {
    fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) as f32 / 2.0,
            (self.y_min + self.y_max) as f32 / 2.0,
        )
    }

    fn area(&self) -> u64 {
        self.width() * self.height()
    }

    fn bbox(&self) -> Rect {
        *self
    }
}

impl CollidesWith<Rect> for Rect {
    /// Strict overlap: both projections must intersect with a non-zero length.
    /// Rectangles that only share an edge or a corner do not collide.
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        u64::max(self.x_min, other.x_min) < u64::min(self.x_max, other.x_max)
            && u64::max(self.y_min, other.y_min) < u64::min(self.y_max, other.y_max)
    }
}
