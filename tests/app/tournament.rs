use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};

use app::persistence::{notifications, organisers, players, tournaments};
use models::domains::{sea_orm_active_enums::TournamentStatus, tournament_entries};
use models::params::tournament::UpdatePointsParams;

use crate::common::*;

#[tokio::test]
async fn created_tournament_is_pending() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;

    let tournament = pending_tournament(&state, &host, "T1", 500).await;
    assert_eq!(tournament.status, TournamentStatus::Pending);
    assert_eq!(tournament.revenue, 0);
    assert_eq!(tournament.winner_team_id, None);

    let err = tournaments::create_tournament(&state.conn, &host.id, tournament_params("T1", 0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn join_without_team_changes_nothing() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let loner = player(&state, "loner").await;
    let tournament = open_tournament(&state, &host, "T1", 500).await;

    let err = tournaments::join_tournament(&state.conn, &tournament.id, &loner.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "Player must be part of a team");

    let entries = tournament_entries::Entity::find().count(&state.conn).await.unwrap();
    assert_eq!(entries, 0);
    let tournament = tournaments::find_tournament(&state.conn, &tournament.id)
        .await
        .unwrap();
    assert_eq!(tournament.revenue, 0);
    let host = organisers::find_organiser(&state.conn, &host.id).await.unwrap();
    assert_eq!(host.total_revenue, 0);
}

#[tokio::test]
async fn pending_tournament_is_closed_for_registration() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let captain = player(&state, "captain").await;
    team(&state, "Alpha", &captain, &[]).await;
    let tournament = pending_tournament(&state, &host, "T1", 0).await;

    let err = tournaments::join_tournament(&state.conn, &tournament.id, &captain.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Tournament is not open for registration");
}

#[tokio::test]
async fn entry_fee_accrues_to_tournament_and_organiser() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let captain = player(&state, "captain").await;
    let mate = player(&state, "mate").await;
    team(&state, "Alpha", &captain, &[&mate]).await;
    let tournament = open_tournament(&state, &host, "T1", 500).await;

    let joined = tournaments::join_tournament(&state.conn, &tournament.id, &mate.id)
        .await
        .unwrap();
    assert_eq!(joined.revenue, 500);
    let host_now = organisers::find_organiser(&state.conn, &host.id).await.unwrap();
    assert_eq!(host_now.total_revenue, 500);

    // Every roster member is recorded as a participant.
    for member in [&captain, &mate] {
        let stats = players::player_stats(&state.conn, &member.id).await.unwrap();
        assert_eq!(stats.tournaments_played, 1);
        assert_eq!(stats.tournaments_won, 0);
        assert_eq!(stats.win_percentage, 0.0);
    }

    let err = tournaments::join_tournament(&state.conn, &tournament.id, &captain.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::CONFLICT);

    let err = tournaments::leave_tournament(&state.conn, &tournament.id, &mate.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::FORBIDDEN);

    let left = tournaments::leave_tournament(&state.conn, &tournament.id, &captain.id)
        .await
        .unwrap();
    assert_eq!(left.revenue, 0);
    let host_now = organisers::find_organiser(&state.conn, &host.id).await.unwrap();
    assert_eq!(host_now.total_revenue, 0);
    let stats = players::player_stats(&state.conn, &mate.id).await.unwrap();
    assert_eq!(stats.tournaments_played, 0);
}

#[tokio::test]
async fn winner_must_lead_the_points_table() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let rival = organiser(&state, "rival").await;
    let alpha_captain = player(&state, "alpha_cap").await;
    let beta_captain = player(&state, "beta_cap").await;
    let alpha = team(&state, "Alpha", &alpha_captain, &[]).await;
    let beta = team(&state, "Beta", &beta_captain, &[]).await;
    let tournament = open_tournament(&state, &host, "T1", 0).await;

    tournaments::join_tournament(&state.conn, &tournament.id, &alpha_captain.id)
        .await
        .unwrap();
    tournaments::join_tournament(&state.conn, &tournament.id, &beta_captain.id)
        .await
        .unwrap();

    let points = |team_name: &str, additional_points| UpdatePointsParams {
        team_name: team_name.to_string(),
        additional_points,
    };

    let err = tournaments::update_points_table(&state.conn, &tournament.id, &rival.id, points("Alpha", 3))
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::FORBIDDEN);

    tournaments::update_points_table(&state.conn, &tournament.id, &host.id, points("Alpha", 3))
        .await
        .unwrap();
    let table =
        tournaments::update_points_table(&state.conn, &tournament.id, &host.id, points("Beta", 5))
            .await
            .unwrap();
    assert_eq!(table[0].team_name, "Beta");
    assert_eq!(table[0].ranking, 1);
    assert_eq!(table[1].team_name, "Alpha");
    assert_eq!(table[1].ranking, 2);

    let err = tournaments::update_points_table(&state.conn, &tournament.id, &host.id, points("Gamma", 1))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Team not found in points table");

    let err = tournaments::update_winner(&state.conn, &tournament.id, &host.id, &alpha.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::BAD_REQUEST);

    let done = tournaments::update_winner(&state.conn, &tournament.id, &host.id, &beta.id)
        .await
        .unwrap();
    assert_eq!(done.status, TournamentStatus::Completed);
    assert_eq!(done.winner_team_id.as_deref(), Some(beta.id.as_str()));

    let stats = players::player_stats(&state.conn, &beta_captain.id).await.unwrap();
    assert_eq!((stats.tournaments_played, stats.tournaments_won), (1, 1));
    assert_eq!(stats.win_percentage, 100.0);
    let stats = players::player_stats(&state.conn, &alpha_captain.id).await.unwrap();
    assert_eq!(stats.win_percentage, 0.0);

    let err = tournaments::update_points_table(&state.conn, &tournament.id, &host.id, points("Beta", 1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn newcomer_is_ranked_by_points() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let alpha_captain = player(&state, "alpha_cap").await;
    let beta_captain = player(&state, "beta_cap").await;
    team(&state, "Alpha", &alpha_captain, &[]).await;
    team(&state, "Beta", &beta_captain, &[]).await;
    let tournament = open_tournament(&state, &host, "T1", 0).await;

    tournaments::join_tournament(&state.conn, &tournament.id, &alpha_captain.id)
        .await
        .unwrap();
    let penalty = UpdatePointsParams {
        team_name: "Alpha".to_string(),
        additional_points: -5,
    };
    tournaments::update_points_table(&state.conn, &tournament.id, &host.id, penalty)
        .await
        .unwrap();
    tournaments::join_tournament(&state.conn, &tournament.id, &beta_captain.id)
        .await
        .unwrap();

    let table = tournaments::points_table(&state.conn, &tournament.id).await.unwrap();
    let order: Vec<_> = table
        .iter()
        .map(|e| (e.ranking, e.team_name.as_str(), e.points))
        .collect();
    assert_eq!(order, vec![(1, "Beta", 0), (2, "Alpha", -5)]);
}

#[tokio::test]
async fn points_total_stays_in_range() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let captain = player(&state, "captain").await;
    team(&state, "Alpha", &captain, &[]).await;
    let tournament = open_tournament(&state, &host, "T1", 0).await;
    tournaments::join_tournament(&state.conn, &tournament.id, &captain.id)
        .await
        .unwrap();

    let points = |additional_points| UpdatePointsParams {
        team_name: "Alpha".to_string(),
        additional_points,
    };
    tournaments::update_points_table(&state.conn, &tournament.id, &host.id, points(i32::MAX))
        .await
        .unwrap();
    let err = tournaments::update_points_table(&state.conn, &tournament.id, &host.id, points(1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "Points total is out of range");

    let table = tournaments::points_table(&state.conn, &tournament.id).await.unwrap();
    assert_eq!(table[0].points, i32::MAX);
}

#[tokio::test]
async fn approval_and_rejection_notify_the_organiser() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let approved = pending_tournament(&state, &host, "T1", 0).await;
    let rejected = pending_tournament(&state, &host, "T2", 0).await;

    let approved = tournaments::approve_tournament(&state.conn, &approved.id)
        .await
        .unwrap();
    assert_eq!(approved.status, TournamentStatus::Approved);
    let err = tournaments::approve_tournament(&state.conn, &approved.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::BAD_REQUEST);

    tournaments::reject_tournament(&state.conn, &rejected.id, "Missing rules")
        .await
        .unwrap();
    let err = tournaments::find_tournament(&state.conn, &rejected.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::NOT_FOUND);

    let messages: Vec<String> = notifications::list_notifications(&state.conn, &host.id)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(messages.len(), 2);
    assert!(messages.contains(&"Your tournament \"Cup T1\" has been approved".to_string()));
    assert!(messages.contains(
        &"Your tournament \"Cup T2\" has been rejected. Reason: Missing rules".to_string()
    ));

    let unread = notifications::mark_all_read(&state.conn, &host.id).await.unwrap();
    assert_eq!(unread, 2);
}
