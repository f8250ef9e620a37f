//! End-to-end game scenarios driven through the public `Game` API.

use tilewar::board::Province;
use tilewar::{
    ActionError, AxialCoord, Board, Game, GameConfig, Outcome, PlayerId, ProvinceId,
    RuleViolation, UnitKind,
};

fn c(q: i32, r: i32) -> AxialCoord {
    AxialCoord::new(q, r)
}

fn hexagon(radius: i32) -> Vec<AxialCoord> {
    let origin = c(0, 0);
    let mut coords = Vec::new();
    for q in -radius..=radius {
        for r in -radius..=radius {
            if origin.distance(c(q, r)) <= radius {
                coords.push(c(q, r));
            }
        }
    }
    coords
}

/// A started two-player board where it is `a`'s turn.
fn duel(land: &[(i32, i32)]) -> (Board, PlayerId, PlayerId) {
    let mut board = Board::new(land.iter().map(|&x| x.into()));
    let a = PlayerId::new("a");
    let b = PlayerId::new("b");
    board.add_player(a.clone());
    board.add_player(b.clone());
    board.game_started = true;
    board.current_player_number = 0;
    (board, a, b)
}

fn only_province<'a>(board: &'a Board, player: &PlayerId) -> &'a Province {
    let provinces = &board.player(player).unwrap().provinces;
    assert_eq!(provinces.len(), 1);
    provinces.values().next().unwrap()
}

#[test]
fn level_one_is_blocked_by_equal_or_stronger_defenders() {
    for defender in [UnitKind::Soldier1, UnitKind::Soldier2, UnitKind::Tower2, UnitKind::Soldier4] {
        let (mut board, a, b) = duel(&[(0, 0), (1, 0), (2, 0)]);
        board.found_province(&a, &[c(0, 0)], 0).unwrap();
        board.found_province(&b, &[c(1, 0), c(2, 0)], 0).unwrap();
        board.spawn_unit(c(0, 0), UnitKind::Soldier1).unwrap();
        board.spawn_unit(c(2, 0), defender).unwrap();
        let before = board.clone();

        let mut game = Game::from_board(GameConfig::default(), board);
        assert_eq!(
            game.move_unit(&a, c(0, 0), c(1, 0)),
            Err(ActionError::Rule(RuleViolation::Defended { dest: c(1, 0), by: c(2, 0) })),
            "defender {defender:?}"
        );
        assert_eq!(game.board(), &before);
    }
}

#[test]
fn defender_on_the_target_tile_blocks() {
    for defender in [UnitKind::Soldier1, UnitKind::Tower2, UnitKind::Castle] {
        let (mut board, a, b) = duel(&[(0, 0), (1, 0), (2, 0)]);
        board.found_province(&a, &[c(0, 0)], 0).unwrap();
        board.found_province(&b, &[c(1, 0), c(2, 0)], 0).unwrap();
        board.spawn_unit(c(0, 0), UnitKind::Soldier1).unwrap();
        board.spawn_unit(c(1, 0), defender).unwrap();
        let before = board.clone();

        let mut game = Game::from_board(GameConfig::default(), board);
        assert_eq!(
            game.move_unit(&a, c(0, 0), c(1, 0)),
            Err(ActionError::Rule(RuleViolation::Defended { dest: c(1, 0), by: c(1, 0) })),
            "defender {defender:?}"
        );
        assert_eq!(game.board(), &before);
    }
}

#[test]
fn tower_bought_onto_enemy_land_captures_it() {
    let (mut board, a, b) = duel(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
    let id = board.found_province(&a, &[c(0, 0), c(1, 0)], 20).unwrap();
    board.found_province(&b, &[c(2, 0), c(3, 0)], 0).unwrap();
    board.spawn_unit(c(3, 0), UnitKind::Soldier1).unwrap();

    let mut game = Game::from_board(GameConfig::default(), board);
    let outcome = game.purchase(&a, id, c(2, 0), UnitKind::Tower2).unwrap();
    let Outcome::Purchased { captured: Some(report), cost, .. } = outcome else {
        panic!("expected a capture, got {outcome:?}");
    };
    assert_eq!(cost, 15);
    assert_eq!(report.previous_owner, Some(b.clone()));
    assert_eq!(game.board().owner_of(c(2, 0)), Some(&a));
    assert_eq!(game.board().tile(c(2, 0)).unwrap().unit, Some(UnitKind::Tower2));
    assert_eq!(game.board().province(&a, id).unwrap().money, 20 - 15);
    assert!(game.board().verify().is_ok());
}

#[test]
fn stronger_attacker_captures() {
    let (mut board, a, b) = duel(&[(0, 0), (1, 0), (2, 0)]);
    board.found_province(&a, &[c(0, 0)], 0).unwrap();
    board.found_province(&b, &[c(1, 0), c(2, 0)], 0).unwrap();
    board.spawn_unit(c(0, 0), UnitKind::Soldier3).unwrap();
    board.spawn_unit(c(2, 0), UnitKind::Tower2).unwrap();

    let mut game = Game::from_board(GameConfig::default(), board);
    let outcome = game.move_unit(&a, c(0, 0), c(1, 0)).unwrap();
    let Outcome::Moved { captured: Some(report), .. } = outcome else {
        panic!("expected a capture, got {outcome:?}");
    };
    assert_eq!(report.previous_owner, Some(b.clone()));
    assert_eq!(game.board().owner_of(c(1, 0)), Some(&a));
    assert!(game.board().verify().is_ok());
}

#[test]
fn max_level_captures_through_any_defence() {
    let (mut board, a, b) = duel(&[(0, 0), (1, 0), (2, 0), (1, 1)]);
    board.found_province(&a, &[c(0, 0)], 0).unwrap();
    board.found_province(&b, &[c(1, 0), c(2, 0), c(1, 1)], 0).unwrap();
    board.spawn_unit(c(0, 0), UnitKind::Soldier4).unwrap();
    board.spawn_unit(c(1, 0), UnitKind::Soldier4).unwrap();
    board.spawn_unit(c(2, 0), UnitKind::Tower3).unwrap();

    let mut game = Game::from_board(GameConfig::default(), board);
    let outcome = game.move_unit(&a, c(0, 0), c(1, 0)).unwrap();
    assert!(matches!(
        outcome,
        Outcome::Moved { captured: Some(ref r), .. } if r.destroyed == Some(UnitKind::Soldier4)
    ));
}

#[test]
fn cutting_a_line_leaves_two_enclaves() {
    // b: (1,0)-(2,0)-(3,0), money 7. a attacks the middle from (2,-1).
    let (mut board, a, b) = duel(&[(1, 0), (2, 0), (3, 0), (2, -1)]);
    board.found_province(&a, &[c(2, -1)], 0).unwrap();
    let original = board.found_province(&b, &[c(1, 0), c(2, 0), c(3, 0)], 7).unwrap();
    board.spawn_unit(c(2, -1), UnitKind::Soldier1).unwrap();

    let mut game = Game::from_board(GameConfig::default(), board);
    game.move_unit(&a, c(2, -1), c(2, 0)).unwrap();

    let board = game.board();
    let provinces = &board.player(&b).unwrap().provinces;
    assert_eq!(provinces.len(), 2);
    assert!(!provinces.contains_key(&original));
    for province in provinces.values() {
        assert_eq!(province.len(), 1);
        assert_eq!(province.money, 0);
        assert_eq!(province.income, 0);
        assert!(province.enclave);
    }
    assert!(board.verify().is_ok());
}

#[test]
fn largest_fragment_keeps_the_treasury() {
    // b: (0,0)-(1,0)-(2,0)-(3,0)-(4,0) with money 9; cutting (1,0) leaves
    // one tile on the left and three on the right.
    let land: Vec<(i32, i32)> = (0..5).map(|q| (q, 0)).chain([(1, -1)]).collect();
    let (mut board, a, b) = duel(&land);
    board.found_province(&a, &[c(1, -1)], 0).unwrap();
    let all: Vec<_> = (0..5).map(|q| c(q, 0)).collect();
    let original = board.found_province(&b, &all, 9).unwrap();
    board.spawn_unit(c(1, -1), UnitKind::Soldier1).unwrap();

    let mut game = Game::from_board(GameConfig::default(), board);
    game.move_unit(&a, c(1, -1), c(1, 0)).unwrap();

    let survivor = game.board().province(&b, original).unwrap();
    assert_eq!(survivor.len(), 3);
    assert_eq!(survivor.money, 9);
    assert_eq!(survivor.income, 3);
    assert!(game.board().verify().is_ok());
}

#[test]
fn capture_bridging_two_provinces_merges_them() {
    let (mut board, a, _b) = duel(&[(0, 0), (1, 0), (2, 0)]);
    let left = board.found_province(&a, &[c(0, 0)], 5).unwrap();
    board.found_province(&a, &[c(2, 0)], 6).unwrap();
    board.spawn_unit(c(0, 0), UnitKind::Soldier1).unwrap();

    let mut game = Game::from_board(GameConfig::default(), board);
    game.move_unit(&a, c(0, 0), c(1, 0)).unwrap();

    let merged = only_province(game.board(), &a);
    assert_eq!(merged.id, left);
    assert_eq!(merged.len(), 3);
    assert_eq!(merged.money, 11);
    assert_eq!(merged.income, 3 + UnitKind::Soldier1.income());
    assert!(game.board().verify().is_ok());
}

#[test]
fn three_players_cycle_turns_and_collect_income() {
    let config = GameConfig { seed: Some(11), ..GameConfig::default() };
    let mut game = Game::new(config.clone(), hexagon(5));
    let ids: Vec<PlayerId> = ["a", "b", "c"].into_iter().map(PlayerId::from).collect();
    for id in &ids {
        game.add_player(id.clone()).unwrap();
    }
    for id in &ids {
        game.player_ready(id).unwrap();
    }
    assert!(game.board().game_started);

    // A two-tile start with a level-1 soldier earns 2 - 1 per turn.
    let per_turn = 2 + UnitKind::Soldier1.income();
    let expected = [(1, &ids[1]), (2, &ids[2]), (0, &ids[0])];
    for (turn, (number, id)) in expected.into_iter().enumerate() {
        let holder = &ids[turn];
        assert_eq!(
            game.end_turn(holder),
            Ok(Outcome::TurnPassed { current_player_number: number })
        );
        let province = only_province(game.board(), id);
        assert_eq!(province.money, config.starting_money + per_turn);
    }
}

#[test]
fn rejected_purchases_leave_the_board_untouched() {
    let (mut board, a, _b) = duel(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
    let id = board.found_province(&a, &[c(0, 0), c(1, 0)], 12).unwrap();
    let before = board.clone();
    let mut game = Game::from_board(GameConfig::default(), board);

    assert_eq!(
        game.purchase(&a, id, c(0, 0), UnitKind::Soldier2),
        Err(ActionError::Rule(RuleViolation::InsufficientFunds { needed: 20, available: 12 }))
    );
    assert_eq!(
        game.purchase(&a, id, c(3, 0), UnitKind::Soldier1),
        Err(ActionError::Rule(RuleViolation::NotAdjacent { coord: c(3, 0), province: id }))
    );
    assert_eq!(
        game.purchase(&a, ProvinceId(42), c(0, 0), UnitKind::Soldier1),
        Err(ActionError::Rule(RuleViolation::UnknownProvince {
            player: a.clone(),
            province: ProvinceId(42)
        }))
    );
    assert_eq!(game.board(), &before);
}

#[test]
fn purchase_debits_and_books_income() {
    let (mut board, a, _b) = duel(&[(0, 0), (1, 0), (2, 0)]);
    let id = board.found_province(&a, &[c(0, 0), c(1, 0)], 25).unwrap();
    let mut game = Game::from_board(GameConfig::default(), board);

    let outcome = game.purchase(&a, id, c(0, 0), UnitKind::Farm).unwrap();
    assert_eq!(
        outcome,
        Outcome::Purchased { coord: c(0, 0), unit: UnitKind::Farm, cost: 10, captured: None }
    );
    let outcome = game.purchase(&a, id, c(2, 0), UnitKind::Soldier1).unwrap();
    assert!(matches!(outcome, Outcome::Purchased { captured: Some(_), .. }));

    let province = game.board().province(&a, id).unwrap();
    assert_eq!(province.money, 25 - 10 - 10);
    assert_eq!(province.len(), 3);
    assert_eq!(province.income, 3 + UnitKind::Farm.income() + UnitKind::Soldier1.income());
}

#[test]
fn clearing_a_tree_pays_the_bonus() {
    let (mut board, a, _b) = duel(&[(0, 0), (1, 0)]);
    let id = board.found_province(&a, &[c(0, 0), c(1, 0)], 0).unwrap();
    board.spawn_unit(c(0, 0), UnitKind::Soldier1).unwrap();
    board.spawn_unit(c(1, 0), UnitKind::Pine).unwrap();
    let config = GameConfig::default();
    let bonus = config.clearing_bonus;

    let mut game = Game::from_board(config, board);
    game.move_unit(&a, c(0, 0), c(1, 0)).unwrap();
    let province = game.board().province(&a, id).unwrap();
    assert_eq!(province.money, bonus);
    assert_eq!(province.income, 2 + UnitKind::Soldier1.income());
}

#[test]
fn trees_spread_when_the_round_wraps() {
    let config = GameConfig { tree_spread: true, seed: Some(5), ..GameConfig::default() };
    let (mut board, a, b) = duel(&[(0, 0), (1, 0), (5, 5), (6, 5)]);
    let pa = board.found_province(&a, &[c(0, 0), c(1, 0)], 0).unwrap();
    board.found_province(&b, &[c(5, 5), c(6, 5)], 0).unwrap();
    board.spawn_unit(c(0, 0), UnitKind::Pine).unwrap();

    let mut game = Game::from_board(config, board);
    game.end_turn(&a).unwrap();
    assert_eq!(game.board().tile(c(1, 0)).unwrap().unit, None);
    game.end_turn(&b).unwrap();
    assert_eq!(game.board().tile(c(1, 0)).unwrap().unit, Some(UnitKind::Pine));
    assert_eq!(game.board().province(&a, pa).unwrap().income, 2 - 2);
}

#[test]
fn board_snapshot_survives_json() {
    let mut game = Game::with_terrain(
        GameConfig { seed: Some(2), ..GameConfig::default() },
        hexagon(4),
        [(c(0, 0), UnitKind::Pine), (c(-4, 4), UnitKind::Grave)],
    )
    .unwrap();
    for id in ["a", "b"] {
        game.add_player(id.into()).unwrap();
        game.player_ready(&id.into()).unwrap();
    }

    let json = serde_json::to_string(game.board()).unwrap();
    assert!(json.contains("\"0,0\""));
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, game.board());
}
