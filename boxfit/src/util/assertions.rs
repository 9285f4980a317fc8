use std::collections::HashMap;

use float_cmp::approx_eq;
use itertools::Itertools;
use log::error;

use crate::entities::{Container, Piece, ResultRecord};
use crate::geometry::geo_traits::{CollidesWith, Shape};
use crate::geometry::primitives::{Point, Rect};

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks and in tests

/// Accumulated weight and area equal the sums over the manifest, and all three capacity limits hold.
pub fn container_is_consistent(c: &Container) -> bool {
    let weight = c.manifest().iter().map(|pp| pp.weight as u64).sum::<u64>();
    let area = c.manifest().iter().map(|pp| pp.area).sum::<u64>();

    if weight != c.weight() || area != c.area() {
        error!(
            "container {} totals drifted: weight {} (manifest {weight}), area {} (manifest {area})",
            c.id,
            c.weight(),
            c.area()
        );
        return false;
    }
    container_within_capacity(c)
}

pub fn container_within_capacity(c: &Container) -> bool {
    let ok = c.weight() <= c.max_weight()
        && c.area() <= c.max_area()
        && c.n_placed() <= c.max_count();
    if !ok {
        error!(
            "container {} over capacity: weight {}/{}, area {}/{}, count {}/{}",
            c.id,
            c.weight(),
            c.max_weight(),
            c.area(),
            c.max_area(),
            c.n_placed(),
            c.max_count()
        );
    }
    ok
}

/// Every placed piece lies within the container and no two placed pieces overlap.
pub fn container_layout_is_feasible(c: &Container) -> bool {
    let bbox = c.bbox();
    if let Some(pp) = c.manifest().iter().find(|pp| !pp.rect.fits_inside(&bbox)) {
        error!("piece {} sticks out of container {}: {:?}", pp.piece_id, c.id, pp.rect);
        return false;
    }
    if let Some((a, b)) = c
        .manifest()
        .iter()
        .tuple_combinations()
        .find(|(a, b)| a.rect.collides_with(&b.rect))
    {
        error!(
            "pieces {} and {} overlap in container {}",
            a.piece_id, b.piece_id, c.id
        );
        return false;
    }
    true
}

/// True if all ids yielded by the iterator are distinct.
pub fn ids_are_unique(ids: impl IntoIterator<Item = usize>) -> bool {
    ids.into_iter().all_unique()
}

/// Every piece is placed exactly where the manifests say it is, and every manifest entry refers to a piece.
pub fn pieces_match_containers(pieces: &[Piece], containers: &[Container]) -> bool {
    let entries: HashMap<usize, (usize, _)> = containers
        .iter()
        .flat_map(|c| c.manifest().iter().map(move |pp| (pp.piece_id, (c.id, pp.transform))))
        .collect();

    let n_entries = containers.iter().map(|c| c.n_placed()).sum::<usize>();
    if n_entries != entries.len() || n_entries != pieces.len() {
        error!(
            "{} manifest entries ({} distinct) for {} pieces",
            n_entries,
            entries.len(),
            pieces.len()
        );
        return false;
    }

    pieces.iter().all(|p| {
        let matches = match (p.placement(), entries.get(&p.id)) {
            (Some(pl), Some((c_id, transform))) => {
                pl.container_id == *c_id && pl.transform == *transform
            }
            _ => false,
        };
        if !matches {
            error!("piece {} placement does not match the manifests", p.id);
        }
        matches
    })
}

/// The piece records of a laid out group are positioned inside the container record,
/// do not overlap and have centroids consistent with their position and size.
pub fn layout_group_is_feasible(group: &[ResultRecord]) -> bool {
    let Some(ResultRecord::Container(container)) = group.first() else {
        error!("layout group does not start with a container record");
        return false;
    };
    let bounds = Rect::from_corner(0, 0, container.geometry.width, container.geometry.height);

    let mut rects = vec![];
    for record in &group[1..] {
        let geometry = record.geometry();
        let Some(rect) = geometry.rect() else {
            error!("record {} was not positioned", record.id());
            return false;
        };
        if !rect.fits_inside(&bounds) {
            error!("record {} sticks out of container {}", record.id(), container.id);
            return false;
        }
        let Point(cx, cy) = rect.centroid();
        if !approx_eq!(f32, geometry.centroid.0, cx) || !approx_eq!(f32, geometry.centroid.1, cy) {
            error!("record {} has an inconsistent centroid", record.id());
            return false;
        }
        rects.push(rect);
    }

    rects
        .iter()
        .tuple_combinations()
        .all(|(a, b)| !a.collides_with(b))
}
