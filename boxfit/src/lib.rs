//! Entities and primitives to model a 2D packing of rectangular pieces into capacity-bounded containers.

/// Pieces, containers and the flattened result records handed to rendering layers
pub mod entities;

/// Axis-aligned rectangles, orientations and grid transformations
pub mod geometry;

/// Importing problem instances into and exporting solutions out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
