use std::cmp::Reverse;
use std::time::Instant;

use anyhow::{Result, bail};
use boxfit::entities::{ResultRecord, split_groups};
use boxfit::geometry::GridTransform;
use boxfit::geometry::geo_traits::{CollidesWith, Shape};
use boxfit::geometry::primitives::Rect;
use boxfit::util::assertions;
use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thousands::Separable;

use crate::config::BTFConfig;
use crate::opt::Step;
use crate::opt::search::candidate_transforms;

/// A group of result records after running the [`LayoutSolver`] on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedLayout {
    /// The records of the group, in their original order
    pub records: Vec<ResultRecord>,
    /// Whether every piece record received a position.
    /// If `false`, piece records keep the geometry they had before the search
    pub complete: bool,
}

/// Computes non-overlapping positions for the pieces already assigned to a container,
/// ignoring weight, area and count limits.
pub struct LayoutSolver {
    pub config: BTFConfig,
    pub n_nodes: u64,
}

impl LayoutSolver {
    pub fn new(config: BTFConfig) -> Self {
        Self { config, n_nodes: 0 }
    }

    /// Lays out a single group: a container record followed by the piece records assigned to it.
    pub fn solve(&mut self, group: &[ResultRecord]) -> Result<SolvedLayout> {
        let Some(ResultRecord::Container(container)) = group.first() else {
            bail!("layout group does not start with a container record");
        };
        if let Some(r) = group[1..].iter().find(|r| r.is_container()) {
            bail!(
                "layout group of container {} contains another container record ({})",
                container.id,
                r.id()
            );
        }
        if let Some(r) = group
            .iter()
            .find(|r| r.geometry().width == 0 || r.geometry().height == 0)
        {
            bail!(
                "record {} in the layout group of container {} has a degenerate footprint ({}x{})",
                r.id(),
                container.id,
                r.geometry().width,
                r.geometry().height
            );
        }
        let (c_width, c_height) = (container.geometry.width, container.geometry.height);

        //largest current footprint first
        let order = (1..group.len())
            .sorted_by_key(|&i| {
                let g = group[i].geometry();
                Reverse(g.width as u64 * g.height as u64)
            })
            .collect_vec();
        let footprints = order
            .iter()
            .map(|&i| (group[i].geometry().width, group[i].geometry().height))
            .collect_vec();

        self.n_nodes = 0;
        let mut placed = Vec::with_capacity(footprints.len());
        let step = self.backtrack((c_width, c_height), &footprints, &mut placed);

        let mut records = group.to_vec();
        {
            let g = records[0].geometry_mut();
            g.position = Some((0, 0));
            g.centroid = Rect::from_corner(0, 0, c_width, c_height).centroid();
        }

        let complete = match step {
            Step::Solved => {
                for (&r_idx, &(rect, transform)) in order.iter().zip(placed.iter()) {
                    write_placement(&mut records[r_idx], rect, transform);
                }
                debug_assert!(assertions::layout_group_is_feasible(&records));
                debug!(
                    "[LAYOUT] container {}: {} pieces laid out ({} nodes)",
                    container.id,
                    order.len(),
                    self.n_nodes.separate_with_commas()
                );
                true
            }
            Step::DeadEnd | Step::Halted => {
                warn!(
                    "[LAYOUT] container {}: no layout found for its {} pieces ({:?} after {} nodes)",
                    container.id,
                    order.len(),
                    step,
                    self.n_nodes.separate_with_commas()
                );
                false
            }
        };

        Ok(SolvedLayout { records, complete })
    }

    /// `placed` holds the rectangles and transformations of the pieces positioned at shallower depths.
    /// Only those act as obstacles for the piece at depth `placed.len()`.
    fn backtrack(
        &mut self,
        bounds: (u32, u32),
        footprints: &[(u32, u32)],
        placed: &mut Vec<(Rect, GridTransform)>,
    ) -> Step {
        let depth = placed.len();
        if depth == footprints.len() {
            return Step::Solved;
        }
        if self.config.node_limit.is_some_and(|limit| self.n_nodes >= limit) {
            return Step::Halted;
        }
        self.n_nodes += 1;

        let container = Rect::from_corner(0, 0, bounds.0, bounds.1);
        let (width, height) = footprints[depth];

        for transform in candidate_transforms(bounds.0, bounds.1) {
            let rect = transform.apply(width, height);
            if !rect.fits_inside(&container) || placed.iter().any(|(r, _)| r.collides_with(&rect)) {
                continue;
            }
            placed.push((rect, transform));
            match self.backtrack(bounds, footprints, placed) {
                Step::Solved => return Step::Solved,
                step => {
                    placed.pop();
                    if step == Step::Halted {
                        return Step::Halted;
                    }
                }
            }
        }
        Step::DeadEnd
    }
}

/// Writes the outcome of the search into a piece record.
/// A rotated transformation swaps the record's current width and height and toggles its orientation.
fn write_placement(record: &mut ResultRecord, rect: Rect, transform: GridTransform) {
    if let ResultRecord::Piece(p) = record {
        if transform.orientation.is_rotated() {
            p.orientation = p.orientation.toggled();
        }
    }
    let g = record.geometry_mut();
    (g.width, g.height) = transform.orientation.apply(g.width, g.height);
    g.position = Some((transform.x, transform.y));
    g.centroid = rect.centroid();
}

/// Splits a flattened record list into groups and lays out every group.
/// Groups are independent and solved in parallel; the output follows the order of the groups.
pub fn solve_all(records: &[ResultRecord], config: &BTFConfig) -> Result<Vec<SolvedLayout>> {
    let start = Instant::now();
    let groups = split_groups(records)?;

    let layouts = groups
        .par_iter()
        .map(|group| LayoutSolver::new(*config).solve(group))
        .collect::<Result<Vec<SolvedLayout>>>()?;

    info!(
        "[LAYOUT] {}/{} containers laid out in {:.3}ms",
        layouts.iter().filter(|l| l.complete).count(),
        layouts.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(layouts)
}
