use serde::{Deserialize, Serialize};

use crate::util::Color;

/// External representation of a [`Piece`](crate::entities::Piece).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPiece {
    /// Unique identifier of the piece
    pub id: u64,
    pub weight: u32,
    /// Width of the natural (unrotated) footprint
    pub width: u32,
    /// Height of the natural (unrotated) footprint
    pub height: u32,
    #[serde(default)]
    pub name: String,
    /// Rendering tag, transparent if not specified
    #[serde(default)]
    pub color: Color,
}

/// External representation of a [`Container`](crate::entities::Container).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtContainer {
    /// Unique identifier of the container
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub max_weight: u64,
    pub width: u32,
    pub height: u32,
    /// Maximum summed area of the pieces, which can be smaller than `width * height`
    pub max_area: u64,
    /// Maximum number of pieces
    pub max_count: usize,
}

/// External representation of an [`Instance`](crate::entities::Instance).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInstance {
    /// The name of the instance
    pub name: String,
    /// Set of pieces to be packed
    pub pieces: Vec<ExtPiece>,
    /// Set of containers the pieces have to be spread over
    pub containers: Vec<ExtContainer>,
}

/// A piece placed in a container on the integer grid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlacedPiece {
    /// The id of the piece in the instance
    pub piece_id: u64,
    /// Top-left corner of the effective footprint
    pub x: u32,
    pub y: u32,
    /// Whether width and height were swapped
    pub rotated: bool,
}

/// External representation of a filled container.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtLayout {
    /// The container that was used
    pub container_id: u64,
    /// Accumulated weight of the placed pieces
    pub weight: u64,
    /// Accumulated area of the placed pieces
    pub area: u64,
    /// The pieces placed in the container, in order of placement
    pub placed_pieces: Vec<ExtPlacedPiece>,
}

/// External representation of the outcome of a packing run.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSolution {
    /// Whether all pieces were packed with every container in use
    pub packed: bool,
    /// One entry per container, empty when not packed
    pub layouts: Vec<ExtLayout>,
    pub run_time_ms: u64,
}
