use std::cmp::Reverse;

use boxfit::entities::{Container, Piece};
use boxfit::geometry::{GridTransform, Orientation};
use itertools::{Itertools, iproduct};

/// Order in which pieces are packed: heaviest first, smallest area first among equal weights.
/// Pieces that compare equal keep their input order.
pub fn piece_placement_order(pieces: &[Piece]) -> Vec<usize> {
    (0..pieces.len())
        .sorted_by_key(|&i| (Reverse(pieces[i].weight()), pieces[i].area()))
        .collect_vec()
}

/// Order in which containers are tried: least loaded (by weight) first, ties in input order.
pub fn container_order(containers: &[Container]) -> Vec<usize> {
    (0..containers.len())
        .sorted_by_key(|&i| containers[i].weight())
        .collect_vec()
}

/// Enumerates every grid position of a `width × height` region, row by row (x fastest),
/// yielding the normal and then the rotated orientation for each position.
pub fn candidate_transforms(width: u32, height: u32) -> impl Iterator<Item = GridTransform> {
    iproduct!(0..height, 0..width, Orientation::ALL).map(|(y, x, o)| GridTransform::new(x, y, o))
}
