use std::time::Instant;

use anyhow::{Result, ensure};
use boxfit::entities::{Container, Piece};
use boxfit::geometry::GridTransform;
use boxfit::util::assertions;
use log::{debug, info, trace, warn};
use thousands::Separable;

use crate::config::BTFConfig;
use crate::opt::Step;
use crate::opt::search::{candidate_transforms, container_order, piece_placement_order};

/// Outcome of a packing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackOutcome {
    /// Every piece was assigned and every container holds at least one piece
    Packed,
    /// The search space was exhausted without finding a solution
    Infeasible,
    /// The search was halted after expanding [`BTFConfig::node_limit`] nodes
    NodeLimitReached,
}

/// Backtracking Fill (BTF) packer.
/// Assigns pieces to containers by depth-first search, committing placements directly into
/// the containers and undoing them when a branch turns out to be a dead end.
pub struct Packer {
    pub config: BTFConfig,
    /// Number of search nodes expanded during the last run
    pub n_nodes: u64,
    /// Number of placements committed (and possibly undone) during the last run
    pub n_commits: u64,
}

impl Packer {
    pub fn new(config: BTFConfig) -> Self {
        Self {
            config,
            n_nodes: 0,
            n_commits: 0,
        }
    }

    /// Searches for an assignment of all `pieces` to `containers`.
    ///
    /// On [`PackOutcome::Packed`] the containers hold the solution and every piece carries its placement.
    /// Otherwise all containers are restored to their state before the call and the pieces are left untouched.
    /// Fails only if piece or container ids are not unique.
    pub fn solve(
        &mut self,
        pieces: &mut [Piece],
        containers: &mut [Container],
    ) -> Result<PackOutcome> {
        ensure!(
            assertions::ids_are_unique(pieces.iter().map(|p| p.id)),
            "piece ids must be unique"
        );
        ensure!(
            assertions::ids_are_unique(containers.iter().map(|c| c.id)),
            "container ids must be unique"
        );
        for c in containers.iter().filter(|c| !c.is_empty()) {
            warn!(
                "[PACK] container {} already holds {} piece(s), they are kept in place",
                c.id,
                c.n_placed()
            );
        }

        let start = Instant::now();
        self.n_nodes = 0;
        self.n_commits = 0;

        let order = piece_placement_order(pieces);
        let mut trail = Vec::with_capacity(order.len());

        let step = self.backtrack(pieces, &order, containers, &mut trail);

        let outcome = match step {
            Step::Solved => {
                for (&p_idx, &(c_idx, transform)) in order.iter().zip(trail.iter()) {
                    pieces[p_idx].assign(containers[c_idx].id, transform);
                }
                PackOutcome::Packed
            }
            Step::DeadEnd => PackOutcome::Infeasible,
            Step::Halted => PackOutcome::NodeLimitReached,
        };

        info!(
            "[PACK] search finished in {:.3}ms: {:?} ({} nodes, {} commits)",
            start.elapsed().as_secs_f64() * 1000.0,
            outcome,
            self.n_nodes.separate_with_commas(),
            self.n_commits.separate_with_commas()
        );

        Ok(outcome)
    }

    /// Tries every candidate placement of the piece at depth `trail.len()`, recursing after each commit.
    /// `trail` holds the container index and transformation of every piece committed at a shallower depth.
    fn backtrack(
        &mut self,
        pieces: &[Piece],
        order: &[usize],
        containers: &mut [Container],
        trail: &mut Vec<(usize, GridTransform)>,
    ) -> Step {
        let depth = trail.len();
        if depth == order.len() {
            return match containers.iter().any(Container::is_empty) {
                true => Step::DeadEnd,
                false => Step::Solved,
            };
        }
        if self.config.node_limit.is_some_and(|limit| self.n_nodes >= limit) {
            return Step::Halted;
        }
        self.n_nodes += 1;

        let piece = &pieces[order[depth]];

        for c_idx in container_order(containers) {
            // every candidate in this container would fail on capacity
            if !containers[c_idx].has_capacity_for(piece) {
                continue;
            }
            let (width, height) = (containers[c_idx].width(), containers[c_idx].height());
            for transform in candidate_transforms(width, height) {
                if !containers[c_idx].can_place(piece, transform) {
                    continue;
                }
                containers[c_idx].place(piece, transform);
                trail.push((c_idx, transform));
                self.n_commits += 1;
                debug!(
                    "[PACK] depth {depth}: piece {} in container {} at [{transform}]",
                    piece.id, containers[c_idx].id
                );

                match self.backtrack(pieces, order, containers, trail) {
                    Step::Solved => return Step::Solved,
                    step => {
                        trail.pop();
                        containers[c_idx].remove(piece.id);
                        trace!(
                            "[PACK] depth {depth}: undo piece {} in container {}",
                            piece.id, containers[c_idx].id
                        );
                        if step == Step::Halted {
                            return Step::Halted;
                        }
                    }
                }
            }
        }
        Step::DeadEnd
    }
}

/// Packs `pieces` into `containers` without any search limit.
/// Returns whether every piece was assigned with no container left empty.
pub fn pack(pieces: &mut [Piece], containers: &mut [Container]) -> Result<bool> {
    let outcome = Packer::new(BTFConfig::default()).solve(pieces, containers)?;
    Ok(outcome == PackOutcome::Packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxfit::geometry::Orientation;
    use boxfit::util::Color;

    fn piece(id: usize, weight: u32, width: u32, height: u32) -> Piece {
        Piece::new(id, weight, width, height, format!("p{id}"), Color::default()).unwrap()
    }

    fn container(id: usize, width: u32, height: u32, max_count: usize) -> Container {
        let area = width as u64 * height as u64;
        Container::new(id, format!("c{id}"), 100, width, height, area, max_count).unwrap()
    }

    #[test]
    fn first_piece_goes_to_the_top_left_corner() {
        let mut pieces = vec![piece(0, 1, 3, 2)];
        let mut containers = vec![container(0, 5, 5, 2)];
        assert!(pack(&mut pieces, &mut containers).unwrap());
        let placement = pieces[0].placement().unwrap();
        assert_eq!(placement.container_id, 0);
        assert_eq!(
            placement.transform,
            GridTransform::new(0, 0, Orientation::Normal)
        );
    }

    #[test]
    fn undone_branches_continue_with_remaining_candidates() {
        // the heavy piece is tried in the big container first, where it leaves no room for the other one
        let mut pieces = vec![piece(0, 1, 3, 3), piece(1, 5, 2, 2)];
        let mut containers = vec![container(0, 4, 4, 5), container(1, 2, 2, 5)];
        let mut packer = Packer::new(BTFConfig::default());
        let outcome = packer.solve(&mut pieces, &mut containers).unwrap();

        assert_eq!(outcome, PackOutcome::Packed);
        assert_eq!(pieces[1].placement().map(|p| p.container_id), Some(1));
        assert_eq!(pieces[0].placement().map(|p| p.container_id), Some(0));
        assert!(packer.n_commits > 2);
    }

    #[test]
    fn node_limit_halts_and_restores() {
        let mut pieces = vec![piece(0, 1, 10, 10), piece(1, 1, 10, 10)];
        let mut containers = vec![container(0, 10, 10, 1), container(1, 10, 10, 1)];
        let before = containers.clone();

        let config = BTFConfig {
            node_limit: Some(1),
            ..BTFConfig::default()
        };
        let outcome = Packer::new(config)
            .solve(&mut pieces, &mut containers)
            .unwrap();

        assert_eq!(outcome, PackOutcome::NodeLimitReached);
        assert_eq!(containers, before);
        assert!(pieces.iter().all(|p| !p.is_placed()));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut pieces = vec![piece(3, 1, 1, 1), piece(3, 1, 1, 1)];
        let mut containers = vec![container(0, 5, 5, 2)];
        assert!(pack(&mut pieces, &mut containers).is_err());

        let mut pieces = vec![piece(0, 1, 1, 1), piece(1, 1, 1, 1)];
        let mut containers = vec![container(0, 5, 5, 2), container(0, 5, 5, 2)];
        assert!(pack(&mut pieces, &mut containers).is_err());
    }

    #[test]
    fn more_containers_than_pieces_is_infeasible() {
        let mut pieces = vec![piece(0, 1, 1, 1)];
        let mut containers = vec![container(0, 2, 2, 2), container(1, 2, 2, 2)];
        let before = containers.clone();
        assert!(!pack(&mut pieces, &mut containers).unwrap());
        assert_eq!(containers, before);
    }
}
