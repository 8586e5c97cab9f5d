//! Integration tests for team drawing, manual editing and drag-and-drop moves.

use futsal_console::logic::{
    draw_teams_with, edit_teams, redraw_teams, TeamSelection, TeamSheet, Zone, MIN_ARRIVALS,
};
use futsal_console::{ConsoleError, Player, PlayerId, TeamColor};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Goalkeepers get ids 1.., field players 100..
fn pool(keepers: usize, field: usize) -> Vec<Player> {
    (0..keepers)
        .map(|i| Player::new(i as i64 + 1, format!("GK{i}"), true))
        .chain((0..field).map(|i| Player::new(100 + i as i64, format!("F{i}"), false)))
        .collect()
}

fn sheet_ids(sheet: &TeamSheet) -> Vec<PlayerId> {
    sheet
        .orange
        .iter()
        .chain(sheet.black.iter())
        .map(|e| e.id())
        .chain(sheet.waiting.iter().map(|p| p.id))
        .collect()
}

fn keeper_of(sheet: &TeamSheet, team: TeamColor) -> &Player {
    let keepers: Vec<_> = sheet.team(team).iter().filter(|e| e.played_as_goalkeeper).collect();
    assert_eq!(keepers.len(), 1, "{team} must have exactly one keeper");
    &keepers[0].player
}

fn drawn(keepers: usize, field: usize, seed: u64) -> TeamSheet {
    let mut rng = StdRng::seed_from_u64(seed);
    draw_teams_with(&pool(keepers, field), &mut rng).unwrap()
}

proptest! {
    #[test]
    fn draw_places_every_arrival_exactly_once(keepers in 0usize..6, field in 0usize..14, seed in any::<u64>()) {
        let players = pool(keepers, field);
        let total = players.len();
        let mut rng = StdRng::seed_from_u64(seed);
        match draw_teams_with(&players, &mut rng) {
            Err(ConsoleError::NotEnoughPlayers { required, available }) => {
                prop_assert!(total < MIN_ARRIVALS);
                prop_assert_eq!(required, MIN_ARRIVALS);
                prop_assert_eq!(available, total);
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
            Ok(sheet) => {
                prop_assert!(total >= MIN_ARRIVALS);
                let ids = sheet_ids(&sheet);
                let unique: HashSet<PlayerId> = ids.iter().copied().collect();
                prop_assert_eq!(ids.len(), total);
                prop_assert_eq!(unique, players.iter().map(|p| p.id).collect::<HashSet<_>>());
                prop_assert_eq!(sheet.orange.len(), 5);
                prop_assert_eq!(sheet.black.len(), 5);
                prop_assert_eq!(sheet.waiting.len(), total - 10);
                prop_assert!(sheet.can_start_match());
            }
        }
    }

    #[test]
    fn two_or_more_keepers_both_keep_goal(keepers in 2usize..6, seed in any::<u64>()) {
        let sheet = drawn(keepers, 10, seed);
        prop_assert!(keeper_of(&sheet, TeamColor::Orange).is_goalkeeper);
        prop_assert!(keeper_of(&sheet, TeamColor::Black).is_goalkeeper);
    }

    #[test]
    fn single_keeper_goes_to_orange(field in 9usize..14, seed in any::<u64>()) {
        let sheet = drawn(1, field, seed);
        prop_assert_eq!(keeper_of(&sheet, TeamColor::Orange).id, 1);
        prop_assert!(!keeper_of(&sheet, TeamColor::Black).is_goalkeeper);
    }

    #[test]
    fn no_keepers_means_two_field_players_in_goal(field in 10usize..14, seed in any::<u64>()) {
        let sheet = drawn(0, field, seed);
        prop_assert!(!keeper_of(&sheet, TeamColor::Orange).is_goalkeeper);
        prop_assert!(!keeper_of(&sheet, TeamColor::Black).is_goalkeeper);
        prop_assert!(sheet.can_start_match());
    }

    #[test]
    fn redraw_keeps_the_same_players(keepers in 0usize..4, field in 10usize..13, seed in any::<u64>()) {
        let sheet = drawn(keepers, field, seed);
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        let again = redraw_teams(&sheet, &mut rng).unwrap();
        let before: HashSet<PlayerId> = sheet_ids(&sheet).into_iter().collect();
        let after: HashSet<PlayerId> = sheet_ids(&again).into_iter().collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(sheet_ids(&again).len(), sheet_ids(&sheet).len());
    }

    #[test]
    fn moves_never_duplicate_a_player(
        seed in any::<u64>(),
        moves in prop::collection::vec((0usize..12, 0u8..5), 0..30),
    ) {
        let mut sheet = drawn(2, 10, seed);
        let ids = sheet_ids(&sheet);
        for (pick, zone) in moves {
            let target = match zone {
                0 => Zone::Goalkeeper { team: TeamColor::Orange },
                1 => Zone::Goalkeeper { team: TeamColor::Black },
                2 => Zone::Field { team: TeamColor::Orange },
                3 => Zone::Field { team: TeamColor::Black },
                _ => Zone::Waiting,
            };
            sheet.move_player(ids[pick], target, true).unwrap();
        }
        let after = sheet_ids(&sheet);
        let unique: HashSet<PlayerId> = after.iter().copied().collect();
        prop_assert_eq!(after.len(), 12);
        prop_assert_eq!(unique.len(), 12);
    }
}

#[test]
fn draw_ignores_repeated_arrivals() {
    let mut players = pool(2, 7);
    players.push(players[0].clone());
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(
        draw_teams_with(&players, &mut rng),
        Err(ConsoleError::NotEnoughPlayers {
            required: 10,
            available: 9
        })
    );
}

#[test]
fn draw_with_the_same_seed_is_repeatable() {
    assert_eq!(drawn(3, 9, 42), drawn(3, 9, 42));
}

fn selection() -> TeamSelection {
    TeamSelection {
        orange_goalkeeper: Some(1),
        black_goalkeeper: Some(2),
        orange_field: vec![100, 101, 102, 103],
        black_field: vec![104, 105, 106, 107],
    }
}

#[test]
fn edit_builds_both_teams_and_leaves_the_rest_waiting() {
    let players = pool(2, 10);
    let sheet = edit_teams(&players, &selection()).unwrap();
    assert!(sheet.can_start_match());
    assert_eq!(keeper_of(&sheet, TeamColor::Orange).id, 1);
    assert_eq!(keeper_of(&sheet, TeamColor::Black).id, 2);
    let waiting: Vec<PlayerId> = sheet.waiting.iter().map(|p| p.id).collect();
    assert_eq!(waiting, vec![108, 109]);
}

#[test]
fn edit_requires_both_goalkeepers() {
    let players = pool(2, 10);
    let mut sel = selection();
    sel.orange_goalkeeper = None;
    assert_eq!(
        edit_teams(&players, &sel),
        Err(ConsoleError::MissingGoalkeeper(TeamColor::Orange))
    );
    let mut sel = selection();
    sel.black_goalkeeper = None;
    assert_eq!(
        edit_teams(&players, &sel),
        Err(ConsoleError::MissingGoalkeeper(TeamColor::Black))
    );
}

#[test]
fn edit_rejects_the_same_goalkeeper_twice() {
    let mut sel = selection();
    sel.black_goalkeeper = Some(1);
    assert_eq!(edit_teams(&pool(2, 10), &sel), Err(ConsoleError::SameGoalkeeper));
}

#[test]
fn edit_needs_exactly_four_field_players() {
    let mut sel = selection();
    sel.black_field.pop();
    assert_eq!(
        edit_teams(&pool(2, 10), &sel),
        Err(ConsoleError::WrongFieldCount {
            team: TeamColor::Black,
            selected: 3
        })
    );
}

#[test]
fn edit_rejects_a_player_on_both_teams() {
    let mut sel = selection();
    sel.black_field[0] = 100;
    assert_eq!(
        edit_teams(&pool(2, 10), &sel),
        Err(ConsoleError::DuplicatePlayer(100))
    );
}

#[test]
fn edit_rejects_players_outside_the_pool() {
    let mut sel = selection();
    sel.orange_field[3] = 999;
    assert_eq!(
        edit_teams(&pool(2, 10), &sel),
        Err(ConsoleError::PlayerNotFound(999))
    );
}

#[test]
fn field_player_in_goal_needs_confirmation() {
    let players = pool(2, 10);
    let mut sheet = edit_teams(&players, &selection()).unwrap();
    let before = sheet.clone();

    let target = Zone::Goalkeeper {
        team: TeamColor::Orange,
    };
    assert_eq!(
        sheet.move_player(108, target, false),
        Err(ConsoleError::GoalkeeperConfirmationRequired(108))
    );
    assert_eq!(sheet, before);

    sheet.move_player(108, target, true).unwrap();
    assert!(sheet.waiting.iter().all(|p| p.id != 108));
    let moved = sheet.orange.iter().find(|e| e.id() == 108).unwrap();
    assert!(moved.played_as_goalkeeper);
    // Orange now has six players and two keepers.
    assert!(!sheet.can_start_match());
}

#[test]
fn registered_goalkeeper_moves_without_confirmation() {
    let players = pool(3, 9);
    let mut sel = selection();
    sel.black_field = vec![104, 105, 106, 107];
    let mut sheet = edit_teams(&players, &sel).unwrap();
    let target = Zone::Goalkeeper {
        team: TeamColor::Black,
    };
    sheet.move_player(3, target, false).unwrap();
    assert!(sheet.black.iter().any(|e| e.id() == 3 && e.played_as_goalkeeper));
}

#[test]
fn keeper_dropped_in_the_field_loses_the_flag() {
    let mut sheet = edit_teams(&pool(2, 10), &selection()).unwrap();
    sheet
        .move_player(
            1,
            Zone::Field {
                team: TeamColor::Black,
            },
            false,
        )
        .unwrap();
    let entry = sheet.black.iter().find(|e| e.id() == 1).unwrap();
    assert!(!entry.played_as_goalkeeper);
    assert!(sheet.goalkeeper(TeamColor::Orange).is_none());
}

#[test]
fn moving_an_unknown_player_fails() {
    let mut sheet = edit_teams(&pool(2, 10), &selection()).unwrap();
    assert_eq!(
        sheet.move_player(555, Zone::Waiting, true),
        Err(ConsoleError::PlayerNotFound(555))
    );
}
