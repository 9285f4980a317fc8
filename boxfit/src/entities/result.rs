use std::cmp::Reverse;

use anyhow::{Result, ensure};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::entities::{Container, Piece};
use crate::geometry::Orientation;
use crate::geometry::primitives::{Point, Rect};
use crate::util::Color;

/// Geometry shared by both kinds of [`ResultRecord`], enough to render the record on its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderGeometry {
    /// Current width, after any rotation applied by the layout solver
    pub width: u32,
    /// Current height, after any rotation applied by the layout solver
    pub height: u32,
    pub area: u64,
    pub centroid: Point,
    /// Top-left corner inside the container, `None` until laid out
    pub position: Option<(u32, u32)>,
}

impl RenderGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            area: width as u64 * height as u64,
            centroid: Point::default(),
            position: None,
        }
    }

    /// The rectangle covered by the record, if it has been positioned.
    pub fn rect(&self) -> Option<Rect> {
        self.position
            .map(|(x, y)| Rect::from_corner(x, y, self.width, self.height))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub id: usize,
    pub name: String,
    pub max_weight: u64,
    pub max_count: usize,
    #[serde(flatten)]
    pub geometry: RenderGeometry,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub id: usize,
    pub name: String,
    pub weight: u32,
    pub color: Color,
    /// Orientation relative to the piece's natural footprint
    pub orientation: Orientation,
    #[serde(flatten)]
    pub geometry: RenderGeometry,
}

/// Flattened representation of a packing result, consumed by rendering layers.
/// A `Container` record followed by the `Piece` records assigned to it forms one group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultRecord {
    Container(ContainerRecord),
    Piece(PieceRecord),
}

impl ResultRecord {
    pub fn id(&self) -> usize {
        match self {
            ResultRecord::Container(c) => c.id,
            ResultRecord::Piece(p) => p.id,
        }
    }

    pub fn geometry(&self) -> &RenderGeometry {
        match self {
            ResultRecord::Container(c) => &c.geometry,
            ResultRecord::Piece(p) => &p.geometry,
        }
    }

    pub fn geometry_mut(&mut self) -> &mut RenderGeometry {
        match self {
            ResultRecord::Container(c) => &mut c.geometry,
            ResultRecord::Piece(p) => &mut p.geometry,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ResultRecord::Container(_))
    }

    /// Orders a group the way it is handed to the layout solver:
    /// the container record first, then the pieces by descending area.
    pub fn sort_for_layout(group: &mut [ResultRecord]) {
        group.sort_by_key(|r| (!r.is_container(), Reverse(r.geometry().area)));
    }
}

impl From<&Container> for ContainerRecord {
    fn from(c: &Container) -> Self {
        ContainerRecord {
            id: c.id,
            name: c.name.clone(),
            max_weight: c.max_weight(),
            max_count: c.max_count(),
            geometry: RenderGeometry::new(c.width(), c.height()),
        }
    }
}

impl From<&Piece> for PieceRecord {
    fn from(p: &Piece) -> Self {
        PieceRecord {
            id: p.id,
            name: p.name.clone(),
            weight: p.weight(),
            color: p.color,
            orientation: Orientation::Normal,
            geometry: RenderGeometry::new(p.width(), p.height()),
        }
    }
}

/// Splits a flattened record list into groups, each starting at a container record.
/// Piece records that precede the first container record have no container to belong to and are rejected.
pub fn split_groups(records: &[ResultRecord]) -> Result<Vec<&[ResultRecord]>> {
    let mut starts = records.iter().positions(|r| r.is_container()).collect_vec();
    ensure!(
        records.is_empty() || starts.first() == Some(&0),
        "malformed result list: {} piece record(s) precede the first container record",
        starts.first().copied().unwrap_or(records.len())
    );
    starts.push(records.len());

    Ok(starts
        .into_iter()
        .tuple_windows()
        .map(|(start, end)| &records[start..end])
        .collect())
}
