#[cfg(test)]
mod tests {
    use boxfit::entities::{Container, Instance, Piece};
    use boxfit::geometry::{GridTransform, Orientation};
    use boxfit::io::export_results;
    use boxfit::util::{Color, assertions};
    use btf::config::BTFConfig;
    use btf::opt::layout_solver::solve_all;
    use btf::opt::packer::{PackOutcome, Packer, pack};
    use itertools::Itertools;
    use rand::prelude::SmallRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    const N_RANDOM_INSTANCES: usize = 25;
    const RANDOM_NODE_LIMIT: u64 = 20_000;

    fn init_logger() {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .try_init();
    }

    fn build(containers: &[(u32, u32, usize)], pieces: &[(u32, u32)]) -> (Vec<Piece>, Vec<Container>) {
        let containers = containers
            .iter()
            .enumerate()
            .map(|(id, &(w, h, max_count))| {
                Container::new(id, format!("c{id}"), 100, w, h, w as u64 * h as u64, max_count)
                    .unwrap()
            })
            .collect_vec();
        let pieces = pieces
            .iter()
            .enumerate()
            .map(|(id, &(w, h))| Piece::new(id, 10, w, h, format!("p{id}"), Color::default()).unwrap())
            .collect_vec();
        (pieces, containers)
    }

    /// Checks everything that has to hold after a successful packing run, including the layout pass
    fn check_packed(pieces: &[Piece], containers: &[Container], require_complete_layout: bool) {
        for c in containers {
            assert!(assertions::container_is_consistent(c));
            assert!(assertions::container_layout_is_feasible(c));
            assert!(!c.is_empty(), "container {} is empty", c.id);
        }
        assert!(assertions::pieces_match_containers(pieces, containers));

        let records = export_results(containers, pieces).unwrap();
        let config = BTFConfig {
            node_limit: Some(RANDOM_NODE_LIMIT),
            ..BTFConfig::default()
        };
        let layouts = solve_all(&records, &config).unwrap();
        assert_eq!(layouts.len(), containers.len());
        for (layout, c) in layouts.iter().zip(containers) {
            let ids = layout.records[1..].iter().map(|r| r.id()).collect_vec();
            let manifest_ids = c.manifest().iter().map(|pp| pp.piece_id).collect_vec();
            assert_eq!(ids, manifest_ids);
            assert!(layout.complete || !require_complete_layout);
            if layout.complete {
                assert!(assertions::layout_group_is_feasible(&layout.records));
            }
        }
    }

    #[test_case(&[(10, 10, 5)], &[(5, 5)], true; "single piece fits")]
    #[test_case(&[(5, 5, 5)], &[(10, 10)], false; "piece larger than container")]
    #[test_case(&[(10, 10, 1), (10, 10, 1)], &[(10, 10), (10, 10)], true; "count limit forces a split")]
    #[test_case(&[(10, 4, 5)], &[(4, 10)], true; "rotation is required")]
    #[test_case(&[(4, 4, 4)], &[(2, 2), (2, 2), (2, 2), (2, 2)], true; "exact fit")]
    #[test_case(&[(5, 5, 4)], &[(3, 3), (3, 3)], false; "area fits but shapes do not")]
    #[test_case(&[(6, 6, 3), (6, 6, 3)], &[(6, 6)], false; "one container stays empty")]
    fn scenario(containers: &[(u32, u32, usize)], pieces: &[(u32, u32)], expected: bool) {
        init_logger();
        let (mut pieces, mut containers) = build(containers, pieces);
        let (pieces_before, containers_before) = (pieces.clone(), containers.clone());

        let packed = pack(&mut pieces, &mut containers).unwrap();
        assert_eq!(packed, expected);

        match packed {
            true => check_packed(&pieces, &containers, true),
            false => {
                assert_eq!(containers, containers_before);
                assert_eq!(pieces, pieces_before);
            }
        }
    }

    #[test]
    fn single_piece_is_placed_within_bounds() {
        let (mut pieces, mut containers) = build(&[(10, 10, 5)], &[(5, 5)]);
        assert!(pack(&mut pieces, &mut containers).unwrap());

        let manifest = containers[0].manifest();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest[0].piece_id, 0);
        assert!(manifest[0].rect.fits_inside(&containers[0].bbox()));
        assert_eq!(containers[0].weight(), 10);
        assert_eq!(containers[0].area(), 25);
    }

    #[test]
    fn least_loaded_container_receives_the_next_piece() {
        let (mut pieces, mut containers) = build(&[(10, 10, 1), (10, 10, 1)], &[(10, 10), (10, 10)]);
        assert!(pack(&mut pieces, &mut containers).unwrap());

        assert!(containers.iter().all(|c| c.n_placed() == 1));
        let used = pieces
            .iter()
            .filter_map(|p| p.placement().map(|pl| pl.container_id))
            .sorted()
            .collect_vec();
        assert_eq!(used, vec![0, 1]);
    }

    #[test]
    fn rotation_is_tried_at_every_position() {
        let (mut pieces, mut containers) = build(&[(10, 4, 5)], &[(4, 10)]);
        assert!(pack(&mut pieces, &mut containers).unwrap());

        let placement = pieces[0].placement().unwrap();
        assert_eq!(
            placement.transform,
            GridTransform::new(0, 0, Orientation::Rotated)
        );
        assert_eq!(containers[0].manifest()[0].rect.width(), 10);
    }

    #[test]
    fn reset_instance_packs_identically() {
        init_logger();
        let (pieces, containers) = build(
            &[(6, 6, 3), (5, 5, 3)],
            &[(3, 3), (2, 4), (3, 2), (1, 5)],
        );
        let mut instance = Instance::new("reuse", pieces, containers);

        assert!(pack(&mut instance.pieces, &mut instance.containers).unwrap());
        let first = instance.clone();

        instance.reset();
        assert!(instance.containers.iter().all(Container::is_empty));
        assert!(instance.pieces.iter().all(|p| !p.is_placed()));

        assert!(pack(&mut instance.pieces, &mut instance.containers).unwrap());
        assert_eq!(instance.pieces, first.pieces);
        assert_eq!(instance.containers, first.containers);
    }

    fn random_instance(rng: &mut SmallRng) -> (Vec<Piece>, Vec<Container>) {
        let n_containers = rng.random_range(1..=2);
        let n_pieces = rng.random_range(1..=4);

        let containers = (0..n_containers)
            .map(|id| {
                let (w, h): (u32, u32) = (rng.random_range(3..=6), rng.random_range(3..=6));
                let full_area = w as u64 * h as u64;
                Container::new(
                    id,
                    format!("c{id}"),
                    rng.random_range(5..=30),
                    w,
                    h,
                    rng.random_range(full_area / 2..=full_area),
                    rng.random_range(1..=3),
                )
                .unwrap()
            })
            .collect_vec();

        let pieces = (0..n_pieces)
            .map(|id| {
                Piece::new(
                    id,
                    rng.random_range(1..=10),
                    rng.random_range(1..=4),
                    rng.random_range(1..=4),
                    format!("p{id}"),
                    Color::default(),
                )
                .unwrap()
            })
            .collect_vec();

        (pieces, containers)
    }

    #[test_case(0; "seed 0")]
    #[test_case(1; "seed 1")]
    #[test_case(2; "seed 2")]
    #[test_case(3; "seed 3")]
    #[test_case(4; "seed 4")]
    fn random_instances(seed: u64) {
        init_logger();
        let mut rng = SmallRng::seed_from_u64(seed);
        let config = BTFConfig {
            node_limit: Some(RANDOM_NODE_LIMIT),
            ..BTFConfig::default()
        };

        for _ in 0..N_RANDOM_INSTANCES {
            let (mut pieces, mut containers) = random_instance(&mut rng);
            let (pieces_before, containers_before) = (pieces.clone(), containers.clone());

            let outcome = Packer::new(config)
                .solve(&mut pieces, &mut containers)
                .unwrap();

            match outcome {
                PackOutcome::Packed => check_packed(&pieces, &containers, false),
                PackOutcome::Infeasible | PackOutcome::NodeLimitReached => {
                    assert_eq!(containers, containers_before);
                    assert_eq!(pieces, pieces_before);
                }
            }
        }
    }

    #[test_case(0; "seed 0")]
    #[test_case(1; "seed 1")]
    fn commit_undo_round_trips(seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut container = Container::new(0, "c", 1000, 8, 8, 64, 20).unwrap();

        for id in 0..50 {
            let piece = Piece::new(
                id,
                rng.random_range(1..=20),
                rng.random_range(1..=3),
                rng.random_range(1..=3),
                "",
                Color::default(),
            )
            .unwrap();
            let orientation = match rng.random_bool(0.5) {
                true => Orientation::Rotated,
                false => Orientation::Normal,
            };
            let transform = GridTransform::new(
                rng.random_range(0..8),
                rng.random_range(0..8),
                orientation,
            );

            let before = container.clone();
            if container.try_place(&piece, transform) {
                assert!(assertions::container_is_consistent(&container));
                assert!(assertions::container_layout_is_feasible(&container));
                let removed = container.remove(piece.id).unwrap();
                assert_eq!(container, before);
                container.place(&piece, removed.transform);
            } else {
                assert_eq!(container, before);
            }
        }
    }
}
