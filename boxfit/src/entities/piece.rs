use anyhow::{Result, ensure};

use crate::geometry::primitives::Rect;
use crate::geometry::{GridTransform, Orientation};
use crate::util::Color;

/// Rectangular piece to be placed in a [`Container`](crate::entities::Container)
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    /// Unique identifier within a packing run
    pub id: usize,
    pub name: String,
    pub color: Color,
    weight: u32,
    /// Natural (unrotated) footprint
    width: u32,
    height: u32,
    /// Always equal to `width * height`
    area: u64,
    /// Where the piece ended up after a successful packing run
    placement: Option<PiecePlacement>,
}

/// Container membership and position of a packed [`Piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PiecePlacement {
    pub container_id: usize,
    pub transform: GridTransform,
}

impl Piece {
    pub fn new(
        id: usize,
        weight: u32,
        width: u32,
        height: u32,
        name: impl Into<String>,
        color: Color,
    ) -> Result<Self> {
        ensure!(weight > 0, "piece {id} has a non-positive weight");
        ensure!(
            width > 0 && height > 0,
            "piece {id} has a degenerate footprint: {width}x{height}"
        );
        Ok(Self {
            id,
            name: name.into(),
            color,
            weight,
            width,
            height,
            area: width as u64 * height as u64,
            placement: None,
        })
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> u64 {
        self.area
    }

    /// Effective `(width, height)` in the given orientation, without modifying the piece.
    pub fn footprint(&self, orientation: Orientation) -> (u32, u32) {
        orientation.apply(self.width, self.height)
    }

    /// The rectangle the piece would cover under `transform`.
    #[inline(always)]
    pub fn rect(&self, transform: GridTransform) -> Rect {
        transform.apply(self.width, self.height)
    }

    pub fn placement(&self) -> Option<&PiecePlacement> {
        self.placement.as_ref()
    }

    /// The committed orientation, [`Orientation::Normal`] while unplaced.
    pub fn orientation(&self) -> Orientation {
        self.placement
            .map(|p| p.transform.orientation)
            .unwrap_or_default()
    }

    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    /// Records that the piece was committed to a container.
    pub fn assign(&mut self, container_id: usize, transform: GridTransform) {
        self.placement = Some(PiecePlacement {
            container_id,
            transform,
        });
    }

    pub fn unassign(&mut self) {
        self.placement = None;
    }
}
