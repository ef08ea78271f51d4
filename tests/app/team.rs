use axum::http::StatusCode;

use app::persistence::{players, teams, tournaments};
use models::params::team::CreateTeamParams;

use crate::common::*;

fn named(name: &str) -> CreateTeamParams {
    CreateTeamParams {
        name: name.to_string(),
    }
}

#[tokio::test]
async fn team_names_are_unique() {
    let state = test_state(None).await;
    let first = player(&state, "first").await;
    let second = player(&state, "second").await;

    let alpha = teams::create_team(&state, &first.id, named("Alpha")).await.unwrap();
    assert_eq!(alpha.captain_id, first.id);

    let err = teams::create_team(&state, &second.id, named("Alpha"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::CONFLICT);
    assert_eq!(err.to_string(), "Team name already exists");

    let err = teams::create_team(&state, &first.id, named("Beta"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Player already belongs to a team");

    let second = players::find_player(&state.conn, &second.id).await.unwrap();
    assert_eq!(second.team_id, None);
}

#[tokio::test]
async fn captain_admits_players_through_requests() {
    let state = test_state(None).await;
    let captain = player(&state, "captain").await;
    let applicant = player(&state, "applicant").await;
    let outsider = player(&state, "outsider").await;
    let alpha = team(&state, "Alpha", &captain, &[]).await;
    let beta = team(&state, "Beta", &outsider, &[]).await;

    let request = teams::join_team(&state.conn, &alpha.id, &applicant.id).await.unwrap();
    let other = teams::request_to_join_team(&state.conn, &beta.id, &applicant.id)
        .await
        .unwrap();
    let err = teams::request_to_join_team(&state.conn, &alpha.id, &applicant.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Join request already sent");

    // Membership is only granted by the captain.
    let applicant_now = players::find_player(&state.conn, &applicant.id).await.unwrap();
    assert_eq!(applicant_now.team_id, None);
    let err = teams::list_join_requests(&state.conn, &alpha.id, &applicant.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::FORBIDDEN);
    let err = teams::accept_join_request(&state, &request.id, &outsider.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::FORBIDDEN);

    let roster = teams::accept_join_request(&state, &request.id, &captain.id)
        .await
        .unwrap();
    assert_eq!(roster.players.len(), 2);
    assert!(roster.players.iter().any(|m| m.id == captain.id && m.captain));

    // Other pending requests of an admitted player are dropped.
    let err = teams::accept_join_request(&state, &other.id, &outsider.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn captain_hands_over_before_leaving() {
    let state = test_state(None).await;
    let captain = player(&state, "captain").await;
    let mate = player(&state, "mate").await;
    let outsider = player(&state, "outsider").await;
    let alpha = team(&state, "Alpha", &captain, &[&mate]).await;

    let err = teams::leave_team(&state, &captain.id).await.unwrap_err();
    assert_eq!(err.to_string(), "Transfer captaincy before leaving the team");

    let err = teams::transfer_captaincy(&state.conn, &alpha.id, &captain.id, &outsider.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "New captain must be a team member");

    let alpha_now = teams::transfer_captaincy(&state.conn, &alpha.id, &captain.id, &mate.id)
        .await
        .unwrap();
    assert_eq!(alpha_now.captain_id, mate.id);

    assert!(!teams::leave_team(&state, &captain.id).await.unwrap());
    let err = teams::leave_team(&state, &captain.id).await.unwrap_err();
    assert_eq!(err.to_string(), "Player is not in a team");

    // The last member leaving disbands the team.
    assert!(teams::leave_team(&state, &mate.id).await.unwrap());
    let err = teams::get_team(&state.conn, &alpha.id).await.unwrap_err();
    assert_eq!(err.code(), StatusCode::NOT_FOUND);

    // The name is free again.
    teams::create_team(&state, &outsider.id, named("Alpha")).await.unwrap();
}

#[tokio::test]
async fn registered_team_is_not_disbanded() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let captain = player(&state, "captain").await;
    let alpha = team(&state, "Alpha", &captain, &[]).await;
    let tournament = open_tournament(&state, &host, "T1", 0).await;
    tournaments::join_tournament(&state.conn, &tournament.id, &captain.id)
        .await
        .unwrap();

    let err = teams::leave_team(&state, &captain.id).await.unwrap_err();
    assert_eq!(err.code(), StatusCode::BAD_REQUEST);
    let table = tournaments::points_table(&state.conn, &tournament.id).await.unwrap();
    assert_eq!(table[0].team_id, alpha.id);
    let player_now = players::find_player(&state.conn, &captain.id).await.unwrap();
    assert_eq!(player_now.team_id.as_deref(), Some(alpha.id.as_str()));

    tournaments::leave_tournament(&state.conn, &tournament.id, &captain.id)
        .await
        .unwrap();
    assert!(teams::leave_team(&state, &captain.id).await.unwrap());
    let err = tournaments::update_winner(&state.conn, &tournament.id, &host.id, &alpha.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::BAD_REQUEST);
}
