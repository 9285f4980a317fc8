use serde::{Deserialize, Serialize};

/// Axis-aligned orientation of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Natural footprint, width along the x-axis
    #[default]
    Normal,
    /// Rotated by 90°, width and height swapped
    Rotated,
}

impl Orientation {
    /// Both orientations, in the order in which they are tried during a search.
    pub const ALL: [Orientation; 2] = [Orientation::Normal, Orientation::Rotated];

    /// Effective `(width, height)` of a footprint in this orientation.
    pub fn apply<T>(self, width: T, height: T) -> (T, T) {
        match self {
            Orientation::Normal => (width, height),
            Orientation::Rotated => (height, width),
        }
    }

    /// The orientation obtained by rotating another 90°.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Normal => Orientation::Rotated,
            Orientation::Rotated => Orientation::Normal,
        }
    }

    pub fn is_rotated(self) -> bool {
        self == Orientation::Rotated
    }
}
