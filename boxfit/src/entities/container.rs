use anyhow::{Result, ensure};

use crate::entities::{Piece, PlacedPiece};
use crate::geometry::GridTransform;
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Rect;
use crate::util::assertions;

/// A rectangular container in which [`Piece`]s can be placed, bounded in weight, area and piece count.
/// Pieces are committed with [`Container::place`] and undone with [`Container::remove`],
/// which are exact inverses of each other.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    /// Unique identifier within a packing run
    pub id: usize,
    pub name: String,
    max_weight: u64,
    weight: u64,
    width: u32,
    height: u32,
    max_area: u64,
    area: u64,
    max_count: usize,
    /// Pieces currently placed in the container, in order of placement
    manifest: Vec<PlacedPiece>,
}

impl Container {
    pub fn new(
        id: usize,
        name: impl Into<String>,
        max_weight: u64,
        width: u32,
        height: u32,
        max_area: u64,
        max_count: usize,
    ) -> Result<Self> {
        ensure!(max_weight > 0, "container {id} has a non-positive max weight");
        ensure!(
            width > 0 && height > 0,
            "container {id} has a degenerate footprint: {width}x{height}"
        );
        ensure!(max_area > 0, "container {id} has a non-positive max area");
        ensure!(max_count > 0, "container {id} cannot hold any pieces");
        Ok(Self {
            id,
            name: name.into(),
            max_weight,
            weight: 0,
            width,
            height,
            max_area,
            area: 0,
            max_count,
            manifest: vec![],
        })
    }

    /// The region pieces have to be placed in: `[0, width) × [0, height)`
    pub fn bbox(&self) -> Rect {
        Rect::from_corner(0, 0, self.width, self.height)
    }

    /// True if adding `piece` keeps weight, area and piece count within their limits.
    #[inline(always)]
    pub fn has_capacity_for(&self, piece: &Piece) -> bool {
        self.weight + piece.weight() as u64 <= self.max_weight
            && self.area + piece.area() <= self.max_area
            && self.manifest.len() < self.max_count
    }

    /// True if `rect` overlaps (with non-zero area) any piece already in the manifest.
    #[inline(always)]
    pub fn collides(&self, rect: &Rect) -> bool {
        self.manifest.iter().any(|pp| pp.rect.collides_with(rect))
    }

    /// Placement predicate: the piece under `transform` lies within the container,
    /// does not overlap any placed piece and fits within the remaining capacity.
    pub fn can_place(&self, piece: &Piece, transform: GridTransform) -> bool {
        let rect = piece.rect(transform);
        rect.fits_inside(&self.bbox()) && !self.collides(&rect) && self.has_capacity_for(piece)
    }

    /// Commits `piece` to the manifest under `transform`.
    /// The placement is expected to satisfy [`Container::can_place`].
    pub fn place(&mut self, piece: &Piece, transform: GridTransform) {
        debug_assert!(
            self.can_place(piece, transform),
            "invalid placement of piece {} in container {} at [{transform}]",
            piece.id,
            self.id
        );
        self.weight += piece.weight() as u64;
        self.area += piece.area();
        self.manifest.push(PlacedPiece::new(piece, transform));

        debug_assert!(assertions::container_is_consistent(self));
    }

    /// Commits `piece` if the placement is valid. Returns whether it was placed.
    pub fn try_place(&mut self, piece: &Piece, transform: GridTransform) -> bool {
        match self.can_place(piece, transform) {
            true => {
                self.place(piece, transform);
                true
            }
            false => false,
        }
    }

    /// Removes the piece with `piece_id` from the manifest, undoing its weight and area.
    /// Returns the removed entry, or `None` if the piece is not in this container.
    pub fn remove(&mut self, piece_id: usize) -> Option<PlacedPiece> {
        // during backtracking the piece to undo is almost always the most recent one
        let index = self.manifest.iter().rposition(|pp| pp.piece_id == piece_id)?;
        let pp = self.manifest.remove(index);
        self.weight -= pp.weight as u64;
        self.area -= pp.area;

        debug_assert!(assertions::container_is_consistent(self));

        Some(pp)
    }

    /// Clears the manifest and zeroes the accumulated weight and area, readying the container for a new run.
    pub fn reset(&mut self) {
        self.manifest.clear();
        self.weight = 0;
        self.area = 0;
    }

    pub fn manifest(&self) -> &[PlacedPiece] {
        &self.manifest
    }

    /// True if no pieces are placed
    pub fn is_empty(&self) -> bool {
        self.manifest.is_empty()
    }

    pub fn n_placed(&self) -> usize {
        self.manifest.len()
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn max_weight(&self) -> u64 {
        self.max_weight
    }

    pub fn area(&self) -> u64 {
        self.area
    }

    pub fn max_area(&self) -> u64 {
        self.max_area
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
