//! Integration tests for the goal ledger and end-of-match resolution.

use chrono::NaiveDate;
use futsal_console::logic::{EndMatchResolution, GoalDraft, Scoreboard};
use futsal_console::{ConsoleError, Goal, LineupEntry, Match, PlayerId, TeamColor};

fn row(player_id: PlayerId, is_goalkeeper: bool) -> LineupEntry {
    LineupEntry {
        player_id,
        name: format!("P{player_id}"),
        is_goalkeeper,
        goals_conceded: 0,
    }
}

/// Orange: 1 in goal with 3, 7, 8, 9. Black: 2 in goal with 4, 5, 6, 10.
fn scoreboard() -> Scoreboard {
    Scoreboard {
        game: Match::new(11, 1, 1),
        orange_team: vec![row(1, true), row(3, false), row(7, false), row(8, false), row(9, false)],
        black_team: vec![row(2, true), row(4, false), row(5, false), row(6, false), row(10, false)],
        goals: Vec::new(),
    }
}

fn goal(id: i64, team: TeamColor, scorer_id: PlayerId, assistant_id: Option<PlayerId>) -> Goal {
    Goal {
        id,
        match_id: Some(11),
        team,
        scorer_id,
        scorer_name: None,
        assistant_id,
        assistant_name: None,
        time: None,
    }
}

fn keeper_conceded(board: &Scoreboard, team: TeamColor) -> u32 {
    board
        .lineup(team)
        .iter()
        .find(|e| e.is_goalkeeper)
        .map(|e| e.goals_conceded)
        .unwrap()
}

#[test]
fn scorer_cannot_assist_their_own_goal() {
    assert_eq!(
        GoalDraft::new(TeamColor::Orange, Some(7), Some(7)),
        Err(ConsoleError::SelfAssist)
    );
}

#[test]
fn goal_needs_a_scorer() {
    assert_eq!(
        GoalDraft::new(TeamColor::Orange, None, Some(3)),
        Err(ConsoleError::MissingScorer)
    );
}

#[test]
fn goal_with_assist_raises_the_score_by_one() {
    let mut board = scoreboard();
    let draft = GoalDraft::new(TeamColor::Orange, Some(7), Some(3)).unwrap();
    board.validate_goal(&draft).unwrap();
    board.record_goal(goal(1, TeamColor::Orange, 7, Some(3))).unwrap();

    assert_eq!(board.game.orange_score, 1);
    assert_eq!(board.game.black_score, 0);
    assert_eq!(board.goals.len(), 1);
    assert_eq!(keeper_conceded(&board, TeamColor::Black), 1);
    assert_eq!(keeper_conceded(&board, TeamColor::Orange), 0);
}

#[test]
fn scorer_must_be_on_the_scoring_team() {
    let board = scoreboard();
    let draft = GoalDraft::new(TeamColor::Orange, Some(4), None).unwrap();
    assert_eq!(board.validate_goal(&draft), Err(ConsoleError::PlayerNotFound(4)));
    let draft = GoalDraft::new(TeamColor::Orange, Some(7), Some(5)).unwrap();
    assert_eq!(board.validate_goal(&draft), Err(ConsoleError::PlayerNotFound(5)));
}

#[test]
fn deleting_a_goal_restores_the_score() {
    let mut board = scoreboard();
    board.record_goal(goal(1, TeamColor::Black, 4, None)).unwrap();
    board.record_goal(goal(2, TeamColor::Black, 5, Some(4))).unwrap();
    assert_eq!(board.game.black_score, 2);

    let removed = board.remove_goal(2).unwrap();
    assert_eq!(removed.scorer_id, 5);
    assert_eq!(board.game.black_score, 1);
    assert_eq!(keeper_conceded(&board, TeamColor::Orange), 1);
    assert_eq!(board.remove_goal(2), Err(ConsoleError::GoalNotFound(2)));
}

#[test]
fn ended_match_accepts_no_more_goals() {
    let mut board = scoreboard();
    board.end(Some(TeamColor::Orange)).unwrap();
    assert!(!board.is_active());
    assert_eq!(board.game.winner_team, Some(TeamColor::Orange));
    assert_eq!(
        board.record_goal(goal(1, TeamColor::Orange, 7, None)),
        Err(ConsoleError::MatchEnded)
    );
    let draft = GoalDraft::new(TeamColor::Orange, Some(7), None).unwrap();
    assert_eq!(board.validate_goal(&draft), Err(ConsoleError::MatchEnded));
    assert_eq!(board.end(None), Err(ConsoleError::MatchEnded));
}

#[test]
fn goals_are_listed_oldest_first() {
    let at = |minute: u32| {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(20, minute, 0)
            .unwrap()
    };
    let mut board = scoreboard();
    let mut late = goal(1, TeamColor::Orange, 7, None);
    late.time = Some(at(9));
    let mut early = goal(2, TeamColor::Black, 4, None);
    early.time = Some(at(2));
    let untimed = goal(3, TeamColor::Orange, 8, None);
    board.record_goal(late).unwrap();
    board.record_goal(untimed).unwrap();
    board.record_goal(early).unwrap();

    let order: Vec<i64> = board.goals_chronological().iter().map(|g| g.id).collect();
    assert_eq!(order, vec![2, 1, 3]);
}

fn resolution(orange_score: u32, black_score: u32) -> EndMatchResolution {
    let mut game = Match::new(11, 1, 1);
    game.orange_score = orange_score;
    game.black_score = black_score;
    EndMatchResolution::open(&game)
}

#[test]
fn higher_score_wins() {
    assert_eq!(resolution(3, 1).confirm(), Ok(TeamColor::Orange));
    assert_eq!(resolution(0, 2).confirm(), Ok(TeamColor::Black));
}

#[test]
fn draw_needs_a_tie_break() {
    let mut dialog = resolution(2, 2);
    assert!(dialog.is_draw());
    assert_eq!(dialog.confirm(), Err(ConsoleError::TieBreakRequired));
    assert_eq!(dialog.choose_tie_break(TeamColor::Black), Ok(()));
    assert_eq!(dialog.confirm(), Ok(TeamColor::Black));
}

#[test]
fn tie_break_is_refused_when_not_level() {
    let mut dialog = resolution(3, 1);
    assert_eq!(
        dialog.choose_tie_break(TeamColor::Black),
        Err(ConsoleError::NoTieToBreak)
    );
    assert_eq!(dialog.tie_break, None);
}

#[test]
fn adjusting_scores_clears_the_tie_break() {
    let mut dialog = resolution(1, 1);
    dialog.choose_tie_break(TeamColor::Orange).unwrap();
    dialog.adjust(TeamColor::Black, true);
    assert_eq!(dialog.tie_break, None);
    assert_eq!(dialog.confirm(), Ok(TeamColor::Black));

    dialog.adjust(TeamColor::Black, false);
    dialog.adjust(TeamColor::Black, false);
    dialog.adjust(TeamColor::Black, false);
    assert_eq!(dialog.black_score, 0);
    assert_eq!(dialog.confirm(), Ok(TeamColor::Orange));
}
