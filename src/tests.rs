#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use crate::builder::{BoardBuilder, BuilderInvalidReason};
    use crate::config::{BoardConfig, ConfigError};
    use crate::game::{Game, Mismatch, Outcome, Selection};
    use crate::generator::generate;
    use crate::location::Location;
    use crate::{Board, Path, SolverFailure, MAX_TURNS};

    // every tile occupied; each letter appears twice
    const FULL: &str = "ABCDEF
BCDEFG
GHAIJK
HIJKLM
LMNOPQ
NOPQRR
";

    // the two A tiles are joined only by a four-turn corridor
    const CORRIDOR: &str = "BBCCDDE
E...FFG
G.H.HII
JAJ.KAK
LLM.M.N
NOO...P
PQQRRSS
";

    const ROW_OF_PAIRS: &str = "......
BACCAB
......
......
......
......
";

    fn six_by_six() -> BoardBuilder {
        BoardBuilder::with_dims((NonZero::new(6).unwrap(), NonZero::new(6).unwrap()))
    }

    fn assert_valid_path(board: &Board, path: &Path, start: Location, end: Location) {
        assert_eq!(path.start(), start);
        assert_eq!(path.end(), end);
        assert!(path.len() >= 2);
        assert!(path.turns() <= MAX_TURNS as usize);
        for (a, b) in path.iter().tuple_windows() {
            assert!(a.is_adjacent_to(*b), "{} does not step to {}", a, b);
        }
        for location in path {
            assert!(board.in_extended(*location), "{} is too far outside the board", location);
        }
        for location in &path.locations()[1..path.len() - 1] {
            assert!(board.is_passable(*location), "{} is blocked", location);
        }
    }

    #[test]
    fn parse_round_trips_display() {
        let board = BoardBuilder::parse(FULL).build().unwrap();
        assert_eq!(format!("{}", board), FULL);
        assert_eq!(board.remaining(), 36);

        let board = BoardBuilder::parse(ROW_OF_PAIRS).build().unwrap();
        assert_eq!(format!("{}", board), ROW_OF_PAIRS);
        assert_eq!(board.remaining(), 6);
        assert_eq!(board.kind_at(Location(1, 0)), board.kind_at(Location(1, 5)));
        assert_ne!(board.kind_at(Location(1, 0)), board.kind_at(Location(1, 1)));
        assert_eq!(board.kind_at(Location(0, 0)), None);
    }

    #[test]
    fn remove_pair() {
        let board = six_by_six()
            .add_pair('A', (Location(0, 0), Location(1, 4)))
            .pop_pair()
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "......
......
......
......
......
......
");
    }

    #[test]
    fn builder_rejects_bad_placements() {
        let mut builder = six_by_six();
        builder.add_pair('A', (Location(0, 0), Location(6, 0)));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds(Location(6, 0))]));

        let mut builder = six_by_six();
        builder.add_pair('A', (Location(0, 0), Location(-1, 0)));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds(Location(-1, 0))]));

        let mut builder = six_by_six();
        builder
            .add_pair('A', (Location(0, 0), Location(0, 1)))
            .add_pair('B', (Location(0, 1), Location(0, 2)))
            // ignored, already invalid
            .add_pair('C', (Location(9, 9), Location(0, 3)));
        assert_eq!(builder.build().err(), Some(&vec![BuilderInvalidReason::LocationTaken(Location(0, 1))]));
    }

    #[test]
    fn parse_rejects_bad_layouts() {
        assert_eq!(
            BoardBuilder::parse("AB\nBA\nA.\n").is_valid(),
            Some(&vec![BuilderInvalidReason::UnpairedKind('A')])
        );
        assert_eq!(
            BoardBuilder::parse("AA\nB\n").is_valid(),
            Some(&vec![BuilderInvalidReason::RaggedRow(1)])
        );
        assert_eq!(
            BoardBuilder::parse("\n\n").is_valid(),
            Some(&vec![BuilderInvalidReason::EmptyLayout])
        );
    }

    #[test]
    fn passability() {
        let mut board = BoardBuilder::parse(ROW_OF_PAIRS).build().unwrap();

        assert!(board.is_passable(Location(0, 0)));
        assert!(!board.is_passable(Location(1, 2)));
        // one step outside, including the corners of the ring
        assert!(board.is_passable(Location(-1, 3)));
        assert!(board.is_passable(Location(1, 6)));
        assert!(board.is_passable(Location(6, 6)));
        assert!(board.is_passable(Location(-1, -1)));
        // further out is never passable
        assert!(!board.is_passable(Location(-2, 0)));
        assert!(!board.is_passable(Location(1, 7)));

        assert!(board.clear(Location(1, 2)));
        assert!(board.is_passable(Location(1, 2)));
        assert_eq!(board.kind_at(Location(1, 2)), None);
    }

    #[test]
    fn clearing_is_idempotent() {
        let mut once = BoardBuilder::parse(FULL).build().unwrap();
        assert!(once.clear(Location(2, 2)));

        let mut twice = once.clone();
        assert!(!twice.clear(Location(2, 2)));

        assert_eq!(format!("{}", once), format!("{}", twice));
        assert_eq!(once.remaining(), 35);
        assert_eq!(twice.remaining(), 35);
        assert!(twice.is_cleared(Location(2, 2)));
        // off the board
        assert!(!twice.clear(Location(-1, 0)));
    }

    #[test]
    fn adjacent_tiles_connect_directly() {
        let board = six_by_six()
            .add_pair('A', (Location(0, 0), Location(0, 1)))
            .build()
            .unwrap();

        let path = board.find_connection(Location(0, 0), Location(0, 1)).unwrap().unwrap();
        assert_eq!(path.locations(), &[Location(0, 0), Location(0, 1)]);
        assert_eq!(path.turns(), 0);
    }

    #[test]
    fn adjacent_tiles_connect_on_a_full_board() {
        let board = BoardBuilder::parse(FULL).build().unwrap();

        for row in 0..6 {
            for col in 0..6 {
                let here = Location(row, col);
                for there in [Location(row + 1, col), Location(row, col + 1)] {
                    if !board.contains(there) {
                        continue;
                    }
                    let path = board.find_connection(here, there).unwrap().unwrap();
                    assert_eq!(path.locations(), &[here, there]);
                    assert_eq!(path.turns(), 0);
                }
            }
        }
    }

    #[test]
    fn blocked_column_routes_around() {
        let board = six_by_six()
            .add_pair('A', (Location(0, 0), Location(2, 0)))
            .add_pair('B', (Location(1, 0), Location(5, 5)))
            .build()
            .unwrap();

        let path = board.find_connection(Location(0, 0), Location(2, 0)).unwrap().unwrap();
        assert_valid_path(&board, &path, Location(0, 0), Location(2, 0));
        assert_eq!(path.turns(), 2);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn enclosed_tile_is_unreachable() {
        let board = BoardBuilder::parse(FULL).build().unwrap();

        assert_eq!(board.find_connection(Location(0, 0), Location(2, 2)), Ok(None));
        assert_eq!(board.find_connection(Location(2, 2), Location(0, 0)), Ok(None));
        assert!(!board.is_connectable(Location(0, 0), Location(2, 2)));
    }

    #[test]
    fn corners_connect_around_the_border() {
        let board = BoardBuilder::parse(FULL).build().unwrap();

        let path = board.find_connection(Location(0, 0), Location(5, 5)).unwrap().unwrap();
        assert_valid_path(&board, &path, Location(0, 0), Location(5, 5));
        assert_eq!(path.turns(), 3);
        assert_eq!(path.len(), 15);
    }

    #[test]
    fn four_turns_is_too_many() {
        let mut board = BoardBuilder::parse(CORRIDOR).build().unwrap();
        assert_eq!(board.find_connection(Location(3, 1), Location(3, 5)), Ok(None));

        board.clear(Location(3, 2));
        let path = board.find_connection(Location(3, 1), Location(3, 5)).unwrap().unwrap();
        assert_valid_path(&board, &path, Location(3, 1), Location(3, 5));
        assert_eq!(path.turns(), 3);
        assert_eq!(path.turn_points(), vec![Location(3, 3), Location(5, 3), Location(5, 5)]);
        assert_eq!(board.render_path(&path), ".........
.BBCCDDE.
.E...FFG.
.G.H.HII.
.JA*1KAK.
.LLM*M*N.
.NOO2*3P.
.PQQRRSS.
.........
");
    }

    #[test]
    fn clearing_opens_shorter_routes() {
        let mut board = BoardBuilder::parse(ROW_OF_PAIRS).build().unwrap();

        let before = board.find_connection(Location(1, 0), Location(1, 5)).unwrap().unwrap();
        assert_eq!(before.turns(), 2);
        assert_eq!(before.len(), 8);

        for col in 1..5 {
            board.clear(Location(1, col));
        }

        let after = board.find_connection(Location(1, 0), Location(1, 5)).unwrap().unwrap();
        assert_eq!(after.turns(), 0);
        assert_eq!(after.len(), 6);
    }

    #[test]
    fn unsuitable_endpoints_are_rejected() {
        let mut board = BoardBuilder::parse(FULL).build().unwrap();

        assert_eq!(
            board.find_connection(Location(3, 3), Location(3, 3)),
            Err(SolverFailure::SameLocation(Location(3, 3)))
        );
        assert_eq!(
            board.find_connection(Location(-1, 0), Location(0, 0)),
            Err(SolverFailure::OutOfBounds(Location(-1, 0)))
        );
        assert_eq!(
            board.find_connection(Location(0, 0), Location(0, 6)),
            Err(SolverFailure::OutOfBounds(Location(0, 6)))
        );

        board.clear(Location(0, 1));
        assert_eq!(
            board.find_connection(Location(0, 0), Location(0, 1)),
            Err(SolverFailure::AlreadyCleared(Location(0, 1)))
        );
    }

    #[test]
    fn searches_agree_in_both_directions() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = generate(&BoardConfig::default(), &mut rng).unwrap();

            let mut locations = (0..6)
                .cartesian_product(0..6)
                .map(|(row, col)| Location(row, col))
                .collect_vec();
            locations.shuffle(&mut rng);
            for location in locations.iter().take(seed as usize * 3) {
                board.clear(*location);
            }

            let occupied = locations.iter()
                .copied()
                .filter(|location| board.kind_at(*location).is_some())
                .collect_vec();

            for (a, b) in occupied.iter().copied().tuple_combinations() {
                let forward = board.find_connection(a, b).unwrap();
                let backward = board.find_connection(b, a).unwrap();

                match (forward, backward) {
                    (Some(forward), Some(backward)) => {
                        assert_valid_path(&board, &forward, a, b);
                        assert_valid_path(&board, &backward, b, a);
                        assert_eq!(forward.len(), backward.len());
                        assert_eq!(forward.turns(), backward.turns());
                    }
                    (None, None) => {}
                    (forward, backward) => panic!("{} to {} gave {:?} but the reverse gave {:?}", a, b, forward, backward),
                }
            }
        }
    }

    #[test]
    fn path_geometry() {
        let path = Path::through(&[Location(0, 0), Location(0, -1), Location(2, -1), Location(2, 0)]);

        assert_eq!(path.locations(), &[
            Location(0, 0),
            Location(0, -1),
            Location(1, -1),
            Location(2, -1),
            Location(2, 0),
        ]);
        assert_eq!(path.turns(), 2);
        assert_eq!(path.turn_points(), vec![Location(0, -1), Location(2, -1)]);
        assert_eq!(path.reversed().start(), Location(2, 0));
        assert_eq!(path.reversed().turns(), 2);
        assert_eq!(format!("{}", path), "(0, 0) -> (0, -1) -> (1, -1) -> (2, -1) -> (2, 0)");
    }

    #[test]
    fn generated_boards_pair_every_kind() {
        let config = BoardConfig::default();

        for seed in 0..20 {
            let board = generate(&config, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(board.remaining(), 36);

            let rendered = format!("{}", board);
            assert_eq!(rendered.lines().count(), 6);
            assert!(rendered.lines().all(|line| line.chars().count() == 6));

            let counts = rendered.chars().filter(|c| *c != '\n').counts();
            assert_eq!(counts.len(), 8);
            assert!(counts.keys().all(|kind| config.kinds.contains(kind)));
            // 18 pairs over 8 kinds: two full rounds plus two more
            assert_eq!(counts.values().filter(|count| **count == 6).count(), 2);
            assert_eq!(counts.values().filter(|count| **count == 4).count(), 6);
        }

        let a = generate(&config, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate(&config, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(format!("{}", a), format!("{}", b));
    }

    #[test]
    fn config_validation() {
        assert_eq!(BoardConfig::default().validate(), Ok(()));

        let odd = BoardConfig { rows: 3, cols: 3, ..Default::default() };
        assert_eq!(odd.validate(), Err(ConfigError::OddTileCount { rows: 3, cols: 3 }));

        let empty = BoardConfig { rows: 0, ..Default::default() };
        assert_eq!(empty.validate(), Err(ConfigError::EmptyBoard));

        let no_kinds = BoardConfig { kinds: vec![], ..Default::default() };
        assert_eq!(no_kinds.validate(), Err(ConfigError::NoKinds));

        let duplicate = BoardConfig { kinds: vec!['A', 'B', 'A'], ..Default::default() };
        assert_eq!(duplicate.validate(), Err(ConfigError::DuplicateKind('A')));

        let reserved = BoardConfig { kinds: vec!['A', '.'], ..Default::default() };
        assert_eq!(reserved.validate(), Err(ConfigError::ReservedDisplay('.')));

        assert!(generate(&odd, &mut StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn pairs_resolve_in_selection_order() {
        let mut game = Game::new(BoardBuilder::parse(ROW_OF_PAIRS).build().unwrap());

        assert_eq!(game.select(Location(1, 2)), Selection::Held(Location(1, 2)));
        assert_eq!(game.select(Location(1, 3)), Selection::Queued { first: Location(1, 2), second: Location(1, 3) });
        assert_eq!(game.select(Location(1, 1)), Selection::Held(Location(1, 1)));
        assert_eq!(game.select(Location(1, 4)), Selection::Queued { first: Location(1, 1), second: Location(1, 4) });
        assert_eq!(game.pending(), 2);

        // the A tiles are still walled in by the C tiles until the first pair resolves
        let first = game.resolve_next().unwrap();
        assert_eq!((first.first, first.second), (Location(1, 2), Location(1, 3)));
        match &first.outcome {
            Outcome::Matched { path } => assert_eq!(path.len(), 2),
            other => panic!("expected a match, got {:?}", other),
        }

        let second = game.resolve_next().unwrap();
        assert_eq!((second.first, second.second), (Location(1, 1), Location(1, 4)));
        match &second.outcome {
            Outcome::Matched { path } => {
                assert_eq!(path.turns(), 0);
                assert_eq!(path.len(), 4);
            }
            other => panic!("expected a match, got {:?}", other),
        }

        assert!(game.resolve_next().is_none());
        assert_eq!(game.progress(), 66);
        assert!(!game.is_won());

        let path = game.board().find_connection(Location(1, 0), Location(1, 5)).unwrap().unwrap();
        assert_eq!(path.turns(), 0);
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn selection_ignores_unavailable_tiles() {
        let mut game = Game::new(BoardBuilder::parse(ROW_OF_PAIRS).build().unwrap());

        assert_eq!(game.select(Location(0, 0)), Selection::Ignored);
        assert_eq!(game.select(Location(-1, 0)), Selection::Ignored);

        assert_eq!(game.select(Location(1, 2)), Selection::Held(Location(1, 2)));
        assert_eq!(game.select(Location(1, 2)), Selection::Ignored);
        assert!(matches!(game.select(Location(1, 3)), Selection::Queued { .. }));

        // both are waiting to be resolved
        assert_eq!(game.select(Location(1, 2)), Selection::Ignored);
        assert_eq!(game.select(Location(1, 3)), Selection::Ignored);

        assert_eq!(game.select(Location(1, 0)), Selection::Held(Location(1, 0)));
        assert_eq!(game.deselect(), Some(Location(1, 0)));
        assert_eq!(game.held(), None);
    }

    #[test]
    fn mismatches_leave_the_board_alone() {
        let mut game = Game::new(BoardBuilder::parse(ROW_OF_PAIRS).build().unwrap());
        game.select(Location(1, 0));
        game.select(Location(1, 1));
        let resolution = game.resolve_next().unwrap();
        assert_eq!(resolution.outcome, Outcome::Mismatched(Mismatch::DifferentKinds));
        assert!(!resolution.is_match());
        assert_eq!(game.board().remaining(), 6);

        let mut game = Game::new(BoardBuilder::parse(CORRIDOR).build().unwrap());
        game.select(Location(3, 1));
        game.select(Location(3, 5));
        let resolutions = game.resolve_all();
        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].outcome, Outcome::Mismatched(Mismatch::NoConnection));
        assert_eq!(game.board().remaining(), 38);
    }

    #[test]
    fn clearing_the_last_pair_wins() {
        let mut game = Game::new(BoardBuilder::parse("A.\n.A\n").build().unwrap());
        assert_eq!(game.progress(), 0);

        game.select(Location(0, 0));
        game.select(Location(1, 1));
        let resolutions = game.resolve_all();
        assert!(resolutions[0].is_match());

        assert!(game.is_won());
        assert_eq!(game.progress(), 100);
        assert_eq!(format!("{}", game.board()), "..\n..\n");
    }
}
