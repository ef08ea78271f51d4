use app::persistence::{analytics, dashboard, moderation, organisers, players, tournaments};
use models::domains::sea_orm_active_enums::BannedEntity;
use models::params::tournament::UpdatePointsParams;

use crate::common::*;

#[tokio::test]
async fn fresh_player_has_zero_win_percentage() {
    let state = test_state(None).await;
    let rookie = player(&state, "rookie").await;

    let board = dashboard::player_dashboard(&state, &rookie.id).await.unwrap();
    assert_eq!(board.tournaments_played, 0);
    assert_eq!(board.win_percentage, 0.0);
    assert_eq!(board.global_rank, 1);
    assert!(board.team.is_none());
    assert!(board.recent_tournaments.is_empty());
}

#[tokio::test]
async fn winners_lead_the_leaderboard() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let ace = player(&state, "ace").await;
    let bench = player(&state, "bench").await;
    let cheat = player(&state, "cheat").await;
    let alpha = team(&state, "Alpha", &ace, &[]).await;
    team(&state, "Beta", &bench, &[]).await;
    let tournament = open_tournament(&state, &host, "T1", 0).await;

    for captain in [&ace, &bench] {
        tournaments::join_tournament(&state.conn, &tournament.id, &captain.id)
            .await
            .unwrap();
    }
    tournaments::update_points_table(
        &state.conn,
        &tournament.id,
        &host.id,
        UpdatePointsParams {
            team_name: "Alpha".to_string(),
            additional_points: 2,
        },
    )
    .await
    .unwrap();
    tournaments::update_winner(&state.conn, &tournament.id, &host.id, &alpha.id)
        .await
        .unwrap();
    moderation::ban(&state.conn, BannedEntity::Player, &cheat.id, "Exploits")
        .await
        .unwrap();

    let board = analytics::leaderboard(&state, 10).await.unwrap();
    let names: Vec<&str> = board.iter().map(|e| e.username.as_str()).collect();
    assert_eq!(names, ["ace", "bench"]);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[0].win_percentage, 100.0);
    assert_eq!(board[1].win_percentage, 0.0);

    let top = analytics::leaderboard(&state, 1).await.unwrap();
    assert_eq!(top.len(), 1);

    let bench_board = dashboard::player_dashboard(&state, &bench.id).await.unwrap();
    assert_eq!(bench_board.global_rank, 2);
    assert_eq!(bench_board.recent_tournaments.len(), 1);
    let stats = players::player_stats(&state.conn, &ace.id).await.unwrap();
    assert_eq!(stats.tournaments_won, 1);

    let summary = analytics::platform_summary(&state).await.unwrap();
    assert_eq!(summary.players, 3);
    assert_eq!(summary.completed_tournaments, 1);

    let organiser_board = dashboard::organiser_dashboard(&state, &host.id).await.unwrap();
    assert_eq!(organiser_board.completed_tournaments, 1);
    assert_eq!(organiser_board.unread_notifications, 1);
}

#[tokio::test]
async fn organiser_rating_is_a_running_average() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let first = player(&state, "first").await;
    let second = player(&state, "second").await;

    organisers::rate_organiser(&state, &first.id, &host.id, 5).await.unwrap();
    let rated = organisers::rate_organiser(&state, &second.id, &host.id, 2).await.unwrap();
    assert_eq!(rated.rating, 3.5);
    assert_eq!(rated.rating_count, 2);

    // A second rating from the same player replaces the first.
    let rated = organisers::rate_organiser(&state, &first.id, &host.id, 4).await.unwrap();
    assert_eq!(rated.rating, 3.0);
    assert_eq!(rated.rating_count, 2);
}
