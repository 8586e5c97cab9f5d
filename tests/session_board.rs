//! Integration tests for the win streak and the session tally.

use futsal_console::logic::{win_streak, SessionSummary, WinStreak};
use futsal_console::{Goal, LineupEntry, Match, MatchDetail, PlayerId, TeamColor};

fn finished(number: u32, winner: Option<TeamColor>) -> Match {
    let mut game = Match::new(number as i64, 1, number);
    game.is_active = false;
    game.winner_team = winner;
    game
}

#[test]
fn streak_counts_the_latest_run() {
    use TeamColor::*;
    let matches = vec![
        finished(1, Some(Orange)),
        finished(2, Some(Orange)),
        finished(3, Some(Black)),
        finished(4, Some(Black)),
        finished(5, Some(Black)),
    ];
    let streak = win_streak(&matches);
    assert_eq!(streak, WinStreak { orange: 0, black: 3 });
    assert_eq!(streak.leader(), Some(Black));
}

#[test]
fn latest_draw_means_no_streak() {
    let matches = vec![
        finished(1, Some(TeamColor::Orange)),
        finished(2, Some(TeamColor::Orange)),
        finished(3, None),
    ];
    assert_eq!(win_streak(&matches), WinStreak::default());
}

#[test]
fn streak_ignores_the_match_in_progress_and_input_order() {
    let mut live = Match::new(9, 1, 4);
    live.is_active = true;
    let matches = vec![
        finished(3, Some(TeamColor::Orange)),
        live,
        finished(1, None),
        finished(2, Some(TeamColor::Orange)),
    ];
    assert_eq!(win_streak(&matches), WinStreak { orange: 2, black: 0 });
}

#[test]
fn no_finished_matches_means_no_streak() {
    assert_eq!(win_streak(&[]), WinStreak::default());
}

fn row(player_id: PlayerId, name: &str, is_goalkeeper: bool) -> LineupEntry {
    LineupEntry {
        player_id,
        name: name.to_string(),
        is_goalkeeper,
        goals_conceded: 0,
    }
}

fn goal(id: i64, team: TeamColor, scorer: (PlayerId, &str), assist: Option<(PlayerId, &str)>) -> Goal {
    Goal {
        id,
        match_id: None,
        team,
        scorer_id: scorer.0,
        scorer_name: Some(scorer.1.to_string()),
        assistant_id: assist.map(|a| a.0),
        assistant_name: assist.map(|a| a.1.to_string()),
        time: None,
    }
}

fn session() -> Vec<MatchDetail> {
    let orange = vec![row(1, "Ana", true), row(3, "Bia", false)];
    let black = vec![row(2, "Caio", true), row(4, "Duda", false)];
    vec![
        MatchDetail {
            game: finished(1, Some(TeamColor::Orange)),
            orange_team: orange.clone(),
            black_team: black.clone(),
            goals: vec![
                goal(1, TeamColor::Orange, (3, "Bia"), Some((1, "Ana"))),
                goal(2, TeamColor::Orange, (3, "Bia"), None),
                goal(3, TeamColor::Black, (4, "Duda"), Some((2, "Caio"))),
            ],
        },
        MatchDetail {
            game: finished(2, None),
            orange_team: orange,
            black_team: black,
            goals: vec![goal(4, TeamColor::Black, (4, "Duda"), None)],
        },
    ]
}

#[test]
fn tally_counts_results_and_goals() {
    let summary = SessionSummary::tally(&session());
    assert_eq!(summary.matches_played, 2);
    assert_eq!(summary.orange_wins, 1);
    assert_eq!(summary.black_wins, 0);
    assert_eq!(summary.draws, 1);
    assert_eq!(summary.orange_goals, 2);
    assert_eq!(summary.black_goals, 2);
}

#[test]
fn tally_ranks_players_by_goals_then_assists_then_name() {
    let summary = SessionSummary::tally(&session());
    let order: Vec<&str> = summary.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(order, vec!["Bia", "Duda", "Ana", "Caio"]);
    let bia = &summary.players[0];
    assert_eq!((bia.matches, bia.goals, bia.assists), (2, 2, 0));
    let ana = &summary.players[2];
    assert_eq!((ana.matches, ana.goals, ana.assists), (2, 0, 1));
}

#[test]
fn tally_exports_csv_with_a_header() {
    let csv = SessionSummary::tally(&session()).to_csv().unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("player_id,name,matches,goals,assists"));
    assert_eq!(lines.next(), Some("3,Bia,2,2,0"));
    assert_eq!(csv.lines().count(), 5);
}

#[test]
fn empty_session_tallies_to_nothing() {
    let summary = SessionSummary::tally(&[]);
    assert_eq!(summary, SessionSummary::default());
    assert_eq!(summary.to_csv().unwrap(), "");
}

#[test]
fn match_in_progress_is_not_counted_as_played() {
    let mut details = session();
    let mut live = details[1].clone();
    live.game = Match::new(3, 1, 3);
    live.goals = vec![goal(5, TeamColor::Orange, (3, "Bia"), None)];
    details.push(live);

    let summary = SessionSummary::tally(&details);
    assert_eq!(summary.matches_played, 2);
    assert_eq!(summary.orange_wins + summary.black_wins + summary.draws, 2);
    assert_eq!(summary.orange_goals, 3);
    assert_eq!(summary.players[0].goals, 3);
}
