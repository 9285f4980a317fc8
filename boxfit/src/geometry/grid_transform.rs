use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::geometry::Orientation;
use crate::geometry::primitives::Rect;

/// Placement of a footprint on the integer grid of a container:
/// an optional 90° rotation followed by a translation of its top-left corner to `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy, Default, Serialize, Deserialize)]
pub struct GridTransform {
    pub x: u32,
    pub y: u32,
    pub orientation: Orientation,
}

impl GridTransform {
    pub fn new(x: u32, y: u32, orientation: Orientation) -> Self {
        Self { x, y, orientation }
    }

    /// The rectangle covered by a `width × height` footprint under this transformation.
    #[inline(always)]
    pub fn apply(&self, width: u32, height: u32) -> Rect {
        let (w, h) = self.orientation.apply(width, height);
        Rect::from_corner(self.x, self.y, w, h)
    }
}

impl Display for GridTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = match self.orientation.is_rotated() {
            true => "90°",
            false => "0°",
        };
        write!(f, "r: {r}, t: ({}, {})", self.x, self.y)
    }
}
