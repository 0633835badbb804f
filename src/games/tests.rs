use crate::auth::tests::{OTHER_PASSCODE, PASSCODE};
use crate::challenges::generator::{GenerationError, RoundGenerator};
use crate::challenges::models::Challenge;
use crate::challenges::panorama::PanoramaLookup;
use crate::challenges::pool::CuratedPool;
use crate::challenges::tests::{library, test_config, NoImageryLookup};
use crate::games::consts::TOTAL_ROUNDS;
use crate::games::models::{Advance, FinishedGame, GameSession, RoundState};
use crate::http::tests::{test_context, test_server, test_server_with};
use crate::map::models::Coordinate;
use crate::scores::memory::HashMapScoreStorage;
use crate::scores::models::ScoreSubmission;
use crate::scores::tests::BrokenScoreStorage;
use axum::http::StatusCode;
use axum_test::TestServer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::sync::Arc;

fn library_challenge() -> Challenge {
    Challenge::from(&library())
}

fn on_target() -> Coordinate {
    library().location
}

/// Plays the current round of a session that just got its challenge.
fn play_round(session: &mut GameSession) -> Advance {
    session
        .submit_guess(on_target())
        .expect("Guess wasn't accepted.");
    session.advance()
}

#[test]
fn test_new_session_waits_for_first_challenge() {
    let (session, ticket) = GameSession::new();
    assert_eq!(session.round_index(), 1);
    assert_eq!(session.total_score(), 0);
    assert!(session.round_history().is_empty());
    assert_eq!(ticket.round_index(), 1);
    assert_eq!(session.state(), &RoundState::Loading { ticket });
}

#[test]
fn test_guess_before_challenge_is_ignored() {
    let (mut session, _ticket) = GameSession::new();
    assert_eq!(session.submit_guess(on_target()), None);
    assert_eq!(session.total_score(), 0);
}

#[test]
fn test_challenge_is_installed_once() {
    let (mut session, ticket) = GameSession::new();
    assert!(session.apply_challenge(ticket, library_challenge()));
    assert!(!session.apply_challenge(ticket, library_challenge()));
    assert!(!session.fail_round(ticket, GenerationError::NoContent));
    assert!(matches!(session.state(), RoundState::Guessing { .. }));
}

#[test]
fn test_guess_is_scored_once() {
    let (mut session, ticket) = GameSession::new();
    session.apply_challenge(ticket, library_challenge());

    let result = session.submit_guess(on_target()).unwrap();
    assert_eq!(result.score, 5000);
    assert_eq!(result.distance_meters, 0.0);
    assert_eq!(session.submit_guess(on_target()), None);
    assert_eq!(session.total_score(), 5000);
    assert_eq!(session.round_history(), &[5000]);
}

#[test]
fn test_advance_only_from_result() {
    let (mut session, ticket) = GameSession::new();
    assert_eq!(session.advance(), Advance::Ignored);
    session.apply_challenge(ticket, library_challenge());
    assert_eq!(session.advance(), Advance::Ignored);
    assert_eq!(session.round_index(), 1);
}

#[test]
fn test_full_game_finishes_after_last_round() {
    let (mut session, mut ticket) = GameSession::new();
    for round in 1..TOTAL_ROUNDS {
        session.apply_challenge(ticket, library_challenge());
        let Advance::NextRound(next_ticket) = play_round(&mut session) else {
            panic!("Round {round} didn't lead to the next one.");
        };
        assert_eq!(next_ticket.round_index(), round + 1);
        ticket = next_ticket;
    }
    session.apply_challenge(ticket, library_challenge());

    let finished = play_round(&mut session);

    assert_eq!(
        finished,
        Advance::Finished(FinishedGame {
            generation: session.generation(),
            total_score: 25000,
        })
    );
    assert_eq!(session.round_index(), TOTAL_ROUNDS);
    assert_eq!(session.round_history(), &[5000; 5]);
    assert_eq!(
        session.state(),
        &RoundState::GameOver {
            score_submission: ScoreSubmission::Pending,
        }
    );
    assert_eq!(session.advance(), Advance::Ignored);
}

#[test]
fn test_submission_outcome_is_recorded_once() {
    let (mut session, mut ticket) = GameSession::new();
    let finished = loop {
        session.apply_challenge(ticket, library_challenge());
        match play_round(&mut session) {
            Advance::NextRound(next_ticket) => ticket = next_ticket,
            Advance::Finished(finished) => break finished,
            Advance::Ignored => panic!("Round wasn't played."),
        }
    };

    assert!(session.record_submission(finished.generation, ScoreSubmission::Saved));
    assert!(!session.record_submission(finished.generation, ScoreSubmission::Failed));
    assert_eq!(
        session.state(),
        &RoundState::GameOver {
            score_submission: ScoreSubmission::Saved,
        }
    );
}

#[test]
fn test_restart_only_when_game_cannot_go_on() {
    let (mut session, ticket) = GameSession::new();
    assert_eq!(session.restart(), None);
    session.apply_challenge(ticket, library_challenge());
    assert_eq!(session.restart(), None);
    session.submit_guess(on_target());
    assert_eq!(session.restart(), None);
    assert_eq!(session.total_score(), 5000);
}

#[test]
fn test_stale_challenge_after_restart_is_dropped() {
    let (mut session, first_ticket) = GameSession::new();
    session.fail_round(first_ticket, GenerationError::Exhausted { attempts: 50 });

    let second_ticket = session.restart().expect("Restart wasn't allowed.");

    assert_ne!(first_ticket, second_ticket);
    assert!(!session.apply_challenge(first_ticket, library_challenge()));
    assert_eq!(session.state(), &RoundState::Loading { ticket: second_ticket });
    assert!(session.apply_challenge(second_ticket, library_challenge()));
}

#[test]
fn test_retry_only_after_failed_setup() {
    let (mut session, ticket) = GameSession::new();
    assert_eq!(session.retry_round(), None);
    session.fail_round(ticket, GenerationError::NoContent);

    let retry_ticket = session.retry_round().expect("Retry wasn't allowed.");

    assert_eq!(retry_ticket.round_index(), 1);
    assert!(retry_ticket.generation() > ticket.generation());
    assert_eq!(session.retry_round(), None);
}

async fn create_game(server: &TestServer, passcode: Option<&str>) -> String {
    let request = server.post("/games");
    let request = match passcode {
        Some(passcode) => request.add_header("Passcode", passcode),
        None => request,
    };
    let response = request.await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    body["game"]["gameId"]
        .as_str()
        .expect("Game ID is missing.")
        .to_string()
}

async fn post_game(
    server: &TestServer,
    path: String,
    passcode: Option<&str>,
    guess: Option<Value>,
) -> Value {
    let request = server.post(&path);
    let request = match passcode {
        Some(passcode) => request.add_header("Passcode", passcode),
        None => request,
    };
    let request = match guess {
        Some(guess) => request.json(&guess),
        None => request,
    };
    let response = request.await;
    response.assert_status_ok();
    response.json::<Value>()
}

fn on_target_json() -> Value {
    let target = on_target();
    json!({ "lat": target.lat(), "lng": target.lng() })
}

/// Guesses on target and advances through every round.
async fn play_game(server: &TestServer, game_id: &str, passcode: Option<&str>) -> Value {
    let mut body = Value::Null;
    for _ in 0..TOTAL_ROUNDS {
        let guessed = post_game(
            server,
            format!("/games/{game_id}/guess"),
            passcode,
            Some(on_target_json()),
        )
        .await;
        assert_eq!(guessed["game"]["round"]["kind"], "result");
        assert_eq!(guessed["game"]["round"]["result"]["score"], 5000);
        body = post_game(server, format!("/games/{game_id}/advance"), passcode, None).await;
    }
    body
}

#[tokio::test]
async fn test_new_game_hides_curated_target() {
    let server = test_server();

    let response = server.post("/games").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    let game = &body["game"];
    assert_eq!(body["error"], false);
    assert_eq!(game["roundIndex"], 1);
    assert_eq!(game["totalRounds"], 5);
    assert_eq!(game["maxTotalScore"], 25000);
    assert_eq!(game["round"]["kind"], "guessing");
    assert_eq!(game["round"]["challenge"]["mode"], "curatedImage");
    assert_eq!(
        game["round"]["challenge"]["imageRef"],
        "images/mchenry-library.jpg"
    );
    assert!(game["round"]["challenge"].get("target").is_none());
    assert!(game["round"]["challenge"].get("name").is_none());
}

#[tokio::test]
async fn test_anonymous_game_skips_score_submission() {
    let scores = HashMapScoreStorage::default();
    let server = test_server_with(test_context(scores.clone()));
    let game_id = create_game(&server, None).await;

    let body = play_game(&server, &game_id, None).await;

    let game = &body["game"];
    assert_eq!(game["totalScore"], 25000);
    assert_eq!(game["roundHistory"], json!([5000, 5000, 5000, 5000, 5000]));
    assert_eq!(game["round"]["kind"], "gameOver");
    assert_eq!(game["round"]["scoreSubmission"], "skippedAnonymous");
}

#[tokio::test]
async fn test_signed_in_game_saves_score() {
    let scores = HashMapScoreStorage::default();
    let server = test_server_with(test_context(scores.clone()));
    let game_id = create_game(&server, Some(PASSCODE)).await;

    let body = play_game(&server, &game_id, Some(PASSCODE)).await;

    assert_eq!(body["game"]["round"]["scoreSubmission"], "saved");
    assert_eq!(scores.scores_of("testPlayerId").await, vec![25000]);
    assert_eq!(
        scores.player("testPlayerId").await.map(|player| player.name),
        Some(String::from("Test Player"))
    );
}

#[tokio::test]
async fn test_score_goes_to_player_who_finished() {
    let scores = HashMapScoreStorage::default();
    let server = test_server_with(test_context(scores.clone()));
    let game_id = create_game(&server, None).await;

    let body = play_game(&server, &game_id, Some(OTHER_PASSCODE)).await;

    assert_eq!(body["game"]["round"]["scoreSubmission"], "saved");
    assert_eq!(scores.scores_of("otherPlayerId").await, vec![25000]);
    assert!(scores.scores_of("testPlayerId").await.is_empty());
}

#[tokio::test]
async fn test_advance_while_guessing_changes_nothing() {
    let server = test_server();
    let game_id = create_game(&server, None).await;

    let body = post_game(&server, format!("/games/{game_id}/advance"), None, None).await;

    assert_eq!(body["game"]["roundIndex"], 1);
    assert_eq!(body["game"]["round"]["kind"], "guessing");
}

#[tokio::test]
async fn test_restart_after_game_over() {
    let server = test_server();
    let game_id = create_game(&server, None).await;
    play_game(&server, &game_id, None).await;

    let body = post_game(&server, format!("/games/{game_id}/restart"), None, None).await;

    let game = &body["game"];
    assert_eq!(game["roundIndex"], 1);
    assert_eq!(game["totalScore"], 0);
    assert_eq!(game["roundHistory"], json!([]));
    assert_eq!(game["round"]["kind"], "guessing");
}

#[tokio::test]
async fn test_restart_mid_game_is_ignored() {
    let server = test_server();
    let game_id = create_game(&server, None).await;
    post_game(
        &server,
        format!("/games/{game_id}/guess"),
        None,
        Some(on_target_json()),
    )
    .await;

    let body = post_game(&server, format!("/games/{game_id}/restart"), None, None).await;

    assert_eq!(body["game"]["totalScore"], 5000);
    assert_eq!(body["game"]["round"]["kind"], "result");
}

#[tokio::test]
async fn test_failed_setup_can_be_retried_with_curated_image() {
    let mut config = test_config();
    config.curated_image_probability = 0.0;
    let generator = RoundGenerator::with_rng(
        CuratedPool::new(vec![library()]),
        Some(Arc::new(NoImageryLookup::default()) as Arc<dyn PanoramaLookup>),
        config,
        StdRng::seed_from_u64(3),
    );
    let mut app_context = test_context(HashMapScoreStorage::default());
    app_context.generator = Arc::new(generator);
    let server = test_server_with(app_context);

    let created = server.post("/games").await.json::<Value>();
    let game_id = created["game"]["gameId"].as_str().unwrap().to_string();
    assert_eq!(created["game"]["round"]["kind"], "setupFailed");
    assert_eq!(created["game"]["round"]["reason"], "exhausted");

    let response = server
        .post(&format!("/games/{game_id}/retry-round"))
        .add_query_param("mode", "curatedImage")
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["game"]["roundIndex"], 1);
    assert_eq!(body["game"]["round"]["kind"], "guessing");
    assert_eq!(body["game"]["round"]["challenge"]["mode"], "curatedImage");
}

#[tokio::test]
async fn test_nothing_to_play_fails_setup() {
    let generator = RoundGenerator::new(CuratedPool::default(), None, test_config());
    let mut app_context = test_context(HashMapScoreStorage::default());
    app_context.generator = Arc::new(generator);
    let server = test_server_with(app_context);

    let body = server.post("/games").await.json::<Value>();

    assert_eq!(body["game"]["round"]["kind"], "setupFailed");
    assert_eq!(body["game"]["round"]["reason"], "noContent");
}

#[tokio::test]
async fn test_exited_game_is_gone() {
    let server = test_server();
    let game_id = create_game(&server, None).await;

    server
        .delete(&format!("/games/{game_id}"))
        .await
        .assert_status_ok();

    let response = server.get(&format!("/games/{game_id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": true, "errorCode": "gameNotFound" }));
    server
        .delete(&format!("/games/{game_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_guess_for_unknown_game() {
    let server = test_server();

    let response = server
        .post("/games/noSuchGame/guess")
        .json(&on_target_json())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_out_of_range_guess_is_rejected() {
    let server = test_server();
    let game_id = create_game(&server, None).await;

    let response = server
        .post(&format!("/games/{game_id}/guess"))
        .json(&json!({ "lat": 91.0, "lng": 0.0 }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = server.get(&format!("/games/{game_id}")).await.json::<Value>();
    assert_eq!(body["game"]["round"]["kind"], "guessing");
}

#[tokio::test]
async fn test_invalid_passcode_cannot_create_game() {
    let server = test_server();

    let response = server
        .post("/games")
        .add_header("Passcode", "notReallyAPasscode")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_game_over_even_when_score_store_fails() {
    let mut app_context = test_context(HashMapScoreStorage::default());
    app_context.scores = Arc::new(BrokenScoreStorage);
    let server = test_server_with(app_context);
    let game_id = create_game(&server, Some(PASSCODE)).await;

    let body = play_game(&server, &game_id, Some(PASSCODE)).await;

    assert_eq!(body["game"]["round"]["kind"], "gameOver");
    assert_eq!(body["game"]["round"]["scoreSubmission"], "failed");
    assert_eq!(body["game"]["totalScore"], 25000);
}
