use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, anyhow};
use itertools::Itertools;

use crate::entities::{Container, Piece, ResultRecord};
use crate::io::ext_repr::{ExtLayout, ExtPlacedPiece, ExtSolution};

/// Exports the state of the containers after a packing run.
/// Layouts are only included if the run `packed` all pieces.
pub fn export_solution(containers: &[Container], packed: bool, run_time: Duration) -> ExtSolution {
    let layouts = match packed {
        false => vec![],
        true => containers
            .iter()
            .map(|c| ExtLayout {
                container_id: c.id as u64,
                weight: c.weight(),
                area: c.area(),
                placed_pieces: c
                    .manifest()
                    .iter()
                    .map(|pp| ExtPlacedPiece {
                        piece_id: pp.piece_id as u64,
                        x: pp.transform.x,
                        y: pp.transform.y,
                        rotated: pp.transform.orientation.is_rotated(),
                    })
                    .collect_vec(),
            })
            .collect_vec(),
    };

    ExtSolution {
        packed,
        layouts,
        run_time_ms: run_time.as_millis() as u64,
    }
}

/// Flattens packed containers into a list of [`ResultRecord`]s:
/// per container one container record followed by a record for every piece in its manifest.
/// Piece records carry the natural footprint of the piece and no position, ready to be laid out.
pub fn export_results(containers: &[Container], pieces: &[Piece]) -> Result<Vec<ResultRecord>> {
    let pieces_by_id: HashMap<usize, &Piece> = pieces.iter().map(|p| (p.id, p)).collect();

    let mut records = Vec::with_capacity(containers.len() + pieces.len());
    for c in containers {
        records.push(ResultRecord::Container(c.into()));
        for pp in c.manifest() {
            let piece = pieces_by_id.get(&pp.piece_id).ok_or_else(|| {
                anyhow!(
                    "container {} holds piece {}, which is not part of the instance",
                    c.id,
                    pp.piece_id
                )
            })?;
            records.push(ResultRecord::Piece((*piece).into()));
        }
    }
    Ok(records)
}
