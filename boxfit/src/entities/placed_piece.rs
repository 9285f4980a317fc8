use crate::entities::Piece;
use crate::geometry::GridTransform;
use crate::geometry::primitives::Rect;

/// Represents a [`Piece`] that has been committed to a [`Container`](crate::entities::Container)'s manifest
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedPiece {
    /// `id` of the piece
    pub piece_id: usize,
    pub weight: u32,
    pub area: u64,
    /// The transformation under which the piece was placed
    pub transform: GridTransform,
    /// The effective (post-orientation) footprint of the piece inside the container
    pub rect: Rect,
}

impl PlacedPiece {
    pub fn new(piece: &Piece, transform: GridTransform) -> Self {
        PlacedPiece {
            piece_id: piece.id,
            weight: piece.weight(),
            area: piece.area(),
            transform,
            rect: piece.rect(transform),
        }
    }
}
