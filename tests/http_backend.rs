//! Integration tests for the reqwest backend client against a stub actix-web server.

use actix_web::{web, App, HttpResponse, HttpServer};
use chrono::NaiveDate;
use futsal_console::api::{Backend, LineupsBody};
use futsal_console::logic::GoalDraft;
use futsal_console::{ConsoleError, HttpBackend, PlayerDraft, TeamColor};
use serde_json::{json, Value};
use std::time::Duration;

fn detail(id: i64) -> Value {
    json!({
        "match": {
            "id": id,
            "session_id": 3,
            "match_number": 2,
            "orange_score": 0,
            "black_score": 0,
            "is_active": true,
            "winner_team": null,
            "start_time": "2026-10-19T20:05:00",
        },
        "orange_team": [
            { "player_id": 1, "name": "Ana", "is_goalkeeper": true, "goals_conceded": 0 },
        ],
        "black_team": [
            { "player_id": 2, "name": "Caio", "is_goalkeeper": true },
        ],
        "goals": [],
    })
}

/// Start the stub backend on an ephemeral port and return its base URL.
fn start_stub() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .service(
                web::resource("/api/players")
                    .route(web::get().to(|| async {
                        HttpResponse::Ok().json(json!([
                            { "id": 1, "name": "Ana", "is_goalkeeper": true },
                            { "id": 2, "name": "Bia", "is_goalkeeper": false, "photo_url": null },
                        ]))
                    }))
                    .route(web::post().to(|body: web::Json<Value>| async move {
                        HttpResponse::Created().json(json!({
                            "success": true,
                            "message": "Player created",
                            "player": {
                                "id": 9,
                                "name": body["name"],
                                "is_goalkeeper": body["is_goalkeeper"],
                            },
                        }))
                    })),
            )
            .route(
                "/api/players/{id}",
                web::delete().to(|| async {
                    HttpResponse::BadRequest().json(json!({
                        "success": false,
                        "message": "Player has match history",
                    }))
                }),
            )
            .route(
                "/api/sessions/{date}",
                web::get().to(|| async { HttpResponse::Ok().json(Value::Null) }),
            )
            .route(
                "/api/sessions/{id}/matches",
                web::post().to(|| async {
                    HttpResponse::Ok().json(json!({ "success": true, "match_id": 7 }))
                }),
            )
            .route(
                "/api/matches/{id}",
                web::get().to(|path: web::Path<i64>| async move {
                    HttpResponse::Ok().json(detail(path.into_inner()))
                }),
            )
            .route(
                "/api/matches/{id}/goals",
                web::post().to(|body: web::Json<Value>| async move {
                    HttpResponse::Ok().json(json!({
                        "success": true,
                        "goal": {
                            "id": 40,
                            "match_id": 7,
                            "team": body["team"],
                            "scorer_id": body["scorer_id"],
                            "assistant_id": body["assistant_id"],
                        },
                    }))
                }),
            )
            .route(
                "/api/matches/{id}/end",
                web::post().to(|body: web::Json<Value>| async move {
                    HttpResponse::Ok().json(json!({
                        "success": true,
                        "match": {
                            "id": 7,
                            "match_number": 2,
                            "orange_score": 1,
                            "black_score": 1,
                            "is_active": false,
                            "winner_team": body["winner_team"],
                        },
                    }))
                }),
            )
            .service(
                web::resource("/api/settings")
                    .route(web::get().to(|| async {
                        HttpResponse::Ok().json(json!({ "match_duration": 12 }))
                    }))
                    .route(web::put().to(|| async {
                        HttpResponse::Ok().json(json!({ "success": true }))
                    })),
            )
            .route(
                "/api/logs",
                web::get().to(|| async { HttpResponse::Ok().body("not json") }),
            )
            .route(
                "/api/stats/top-scorers",
                web::get().to(|| async { HttpResponse::InternalServerError().body("boom") }),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

fn client(base_url: &str) -> HttpBackend {
    HttpBackend::new(base_url, Duration::from_secs(5)).unwrap()
}

#[actix_web::test]
async fn lists_come_back_as_bare_arrays() {
    let backend = client(&start_stub());
    let players = backend.list_players().await.unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "Ana");
    assert!(players[0].is_goalkeeper);
    assert!(!players[1].is_goalkeeper);
}

#[actix_web::test]
async fn mutations_unwrap_the_acknowledgement() {
    let backend = client(&start_stub());
    let draft = PlayerDraft {
        name: "Rafa".to_string(),
        is_goalkeeper: true,
        photo_url: None,
    };
    let player = backend.create_player(&draft).await.unwrap();
    assert_eq!(player.id, 9);
    assert_eq!(player.name, "Rafa");
    assert!(player.is_goalkeeper);
}

#[actix_web::test]
async fn refusals_surface_the_backend_message() {
    let backend = client(&start_stub());
    assert_eq!(
        backend.delete_player(1).await,
        Err(ConsoleError::Backend {
            message: "Player has match history".to_string()
        })
    );
}

#[actix_web::test]
async fn server_errors_without_an_ack_report_the_status() {
    let backend = client(&start_stub());
    match backend.top_scorers().await {
        Err(ConsoleError::Backend { message }) => assert!(message.starts_with("HTTP 500")),
        other => panic!("unexpected {:?}", other),
    }
}

#[actix_web::test]
async fn undecodable_answers_are_transport_errors() {
    let backend = client(&start_stub());
    let err = backend.logs().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Transport { .. }));
    assert!(err.is_remote());
}

#[actix_web::test]
async fn empty_lookups_are_none() {
    let backend = client(&start_stub());
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    assert_eq!(backend.session_by_date(date).await, Ok(None));
    let settings = backend.settings().await.unwrap().unwrap();
    assert_eq!(settings.match_duration, 12);
    backend.save_settings(&settings).await.unwrap();
}

#[actix_web::test]
async fn created_match_without_a_record_is_fetched() {
    let backend = client(&start_stub());
    let game = backend.create_match(3, &LineupsBody::default()).await.unwrap();
    assert_eq!(game.id, 7);
    assert_eq!(game.match_number, 2);
    assert!(game.is_active);

    let detail = backend.get_match(7).await.unwrap();
    assert_eq!(detail.team_of(2), Some(TeamColor::Black));
    assert_eq!(detail.black_team[0].goals_conceded, 0);
}

#[actix_web::test]
async fn goals_and_results_round_trip() {
    let backend = client(&start_stub());
    let draft = GoalDraft::new(TeamColor::Orange, Some(3), Some(4)).unwrap();
    let goal = backend.add_goal(7, &draft).await.unwrap();
    assert_eq!(goal.id, 40);
    assert_eq!(goal.team, TeamColor::Orange);
    assert_eq!(goal.assistant_id, Some(4));

    let record = backend.end_match(7, Some(TeamColor::Black)).await.unwrap();
    assert!(!record.is_active);
    assert_eq!(record.winner_team, Some(TeamColor::Black));
}

#[actix_web::test]
async fn unreachable_backend_is_a_transport_error() {
    let backend = HttpBackend::new("http://127.0.0.1:9/", Duration::from_secs(2)).unwrap();
    assert_eq!(backend.base_url(), "http://127.0.0.1:9");
    assert!(matches!(
        backend.list_players().await,
        Err(ConsoleError::Transport { .. })
    ));
}
