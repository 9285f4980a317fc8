use anyhow::{Context, Result, ensure};
use itertools::Itertools;

use crate::entities::{Container, Instance, Piece};
use crate::io::ext_repr::{ExtContainer, ExtInstance, ExtPiece};
use crate::util::assertions;

pub fn import_piece(ext_piece: &ExtPiece) -> Result<Piece> {
    Piece::new(
        ext_piece.id as usize,
        ext_piece.weight,
        ext_piece.width,
        ext_piece.height,
        ext_piece.name.as_str(),
        ext_piece.color,
    )
}

pub fn import_container(ext_cont: &ExtContainer) -> Result<Container> {
    Container::new(
        ext_cont.id as usize,
        ext_cont.name.as_str(),
        ext_cont.max_weight,
        ext_cont.width,
        ext_cont.height,
        ext_cont.max_area,
        ext_cont.max_count,
    )
}

/// Imports an instance into the library.
/// Fails if a piece or container is malformed, if ids are not unique,
/// or if there is nothing to pack or nothing to pack into.
pub fn import(ext_instance: &ExtInstance) -> Result<Instance> {
    ensure!(
        !ext_instance.pieces.is_empty(),
        "instance {} has no pieces",
        ext_instance.name
    );
    ensure!(
        !ext_instance.containers.is_empty(),
        "instance {} has no containers",
        ext_instance.name
    );

    let pieces = ext_instance
        .pieces
        .iter()
        .map(|ep| import_piece(ep).with_context(|| format!("invalid piece {}", ep.id)))
        .collect::<Result<Vec<Piece>>>()?;
    let containers = ext_instance
        .containers
        .iter()
        .map(|ec| import_container(ec).with_context(|| format!("invalid container {}", ec.id)))
        .collect::<Result<Vec<Container>>>()?;

    ensure!(
        assertions::ids_are_unique(pieces.iter().map(|p| p.id)),
        "piece ids must be unique. IDs: {:?}",
        pieces.iter().map(|p| p.id).sorted().collect_vec()
    );
    ensure!(
        assertions::ids_are_unique(containers.iter().map(|c| c.id)),
        "container ids must be unique. IDs: {:?}",
        containers.iter().map(|c| c.id).sorted().collect_vec()
    );

    Ok(Instance::new(ext_instance.name.clone(), pieces, containers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Color;

    fn ext_piece(id: u64, weight: u32) -> ExtPiece {
        ExtPiece {
            id,
            weight,
            width: 2,
            height: 3,
            name: format!("p{id}"),
            color: Color::default(),
        }
    }

    fn ext_container(id: u64) -> ExtContainer {
        ExtContainer {
            id,
            name: format!("c{id}"),
            max_weight: 10,
            width: 5,
            height: 5,
            max_area: 25,
            max_count: 4,
        }
    }

    #[test]
    fn imports_valid_instance() {
        let ext = ExtInstance {
            name: "small".into(),
            pieces: vec![ext_piece(0, 1), ext_piece(1, 2)],
            containers: vec![ext_container(7)],
        };
        let instance = import(&ext).unwrap();
        assert_eq!(instance.pieces.len(), 2);
        assert_eq!(instance.piece(1).map(|p| p.area()), Some(6));
        assert_eq!(instance.container(7).map(|c| c.max_count()), Some(4));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let ext = ExtInstance {
            name: "dup".into(),
            pieces: vec![ext_piece(0, 1), ext_piece(0, 2)],
            containers: vec![ext_container(0)],
        };
        assert!(import(&ext).is_err());

        let ext = ExtInstance {
            name: "dup".into(),
            pieces: vec![ext_piece(0, 1)],
            containers: vec![ext_container(3), ext_container(3)],
        };
        assert!(import(&ext).is_err());
    }

    #[test]
    fn rejects_empty_and_malformed() {
        let empty = ExtInstance {
            name: "empty".into(),
            pieces: vec![],
            containers: vec![ext_container(0)],
        };
        assert!(import(&empty).is_err());

        let no_containers = ExtInstance {
            name: "no containers".into(),
            pieces: vec![ext_piece(0, 1)],
            containers: vec![],
        };
        assert!(import(&no_containers).is_err());

        let weightless = ExtInstance {
            name: "weightless".into(),
            pieces: vec![ext_piece(0, 0)],
            containers: vec![ext_container(0)],
        };
        assert!(import(&weightless).is_err());
    }

    #[test]
    fn color_and_name_are_optional() {
        let json = r#"{"id": 3, "weight": 4, "width": 1, "height": 2}"#;
        let ep: ExtPiece = serde_json::from_str(json).unwrap();
        let piece = import_piece(&ep).unwrap();
        assert_eq!(piece.color, Color::default());
        assert!(piece.name.is_empty());
    }
}
