use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};

use app::persistence::{auth, moderation, organisers, players, tournaments};
use models::domains::{ban_history, sea_orm_active_enums::{BannedEntity, ReportStatus}};
use models::params::{auth::LoginParams, moderation::CreateReportParams};
use models::queries::ReportQuery;
use models::schemas::auth::Role;

use crate::common::*;

#[tokio::test]
async fn unban_is_idempotent() {
    let state = test_state(None).await;
    let target = player(&state, "target").await;

    moderation::ban(&state.conn, BannedEntity::Player, &target.id, "Cheating")
        .await
        .unwrap();
    let err = moderation::ban(&state.conn, BannedEntity::Player, &target.id, "Again")
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::CONFLICT);

    let err = auth::login(
        &state.conn,
        Role::Player,
        LoginParams {
            identifier: "target".to_string(),
            password: "password123".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), StatusCode::FORBIDDEN);

    moderation::unban(&state.conn, BannedEntity::Player, &target.id).await.unwrap();
    moderation::unban(&state.conn, BannedEntity::Player, &target.id).await.unwrap();

    let target = players::find_player(&state.conn, &target.id).await.unwrap();
    assert!(!target.banned);
    assert_eq!(ban_history::Entity::find().count(&state.conn).await.unwrap(), 1);

    let history = moderation::ban_history(&state.conn, &target.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert!(!history[0].active);
    assert_eq!(history[0].reason, "Cheating");
}

#[tokio::test]
async fn banned_teams_cannot_register() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let captain = player(&state, "captain").await;
    let alpha = team(&state, "Alpha", &captain, &[]).await;
    let tournament = open_tournament(&state, &host, "T1", 0).await;

    organisers::ban_team(&state.conn, &host.id, &alpha.id).await.unwrap();
    let err = tournaments::join_tournament(&state.conn, &tournament.id, &captain.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Team is banned by this organiser");
    organisers::unban_team(&state.conn, &host.id, &alpha.id).await.unwrap();

    moderation::ban(&state.conn, BannedEntity::Team, &alpha.id, "Toxic")
        .await
        .unwrap();
    let err = tournaments::join_tournament(&state.conn, &tournament.id, &captain.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Team is banned");

    moderation::unban(&state.conn, BannedEntity::Team, &alpha.id).await.unwrap();
    tournaments::join_tournament(&state.conn, &tournament.id, &captain.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn reports_are_reviewed_by_admins() {
    let state = test_state(None).await;
    let host = organiser(&state, "host").await;
    let reporter = player(&state, "reporter").await;

    let err = moderation::create_report(
        &state.conn,
        &reporter.id,
        CreateReportParams {
            team_id: Some("missing".to_string()),
            organiser_id: None,
            reason: "Smurfing".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), StatusCode::NOT_FOUND);

    let report = moderation::create_report(
        &state.conn,
        &reporter.id,
        CreateReportParams {
            team_id: None,
            organiser_id: Some(host.id.clone()),
            reason: "Prizes never paid".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(report.status, ReportStatus::Pending);

    let reviewed = moderation::review_report(&state.conn, report.id).await.unwrap();
    assert_eq!(reviewed.status, ReportStatus::Reviewed);

    let pending = moderation::list_reports(
        &state.conn,
        ReportQuery {
            status: Some(ReportStatus::Pending),
        },
    )
    .await
    .unwrap();
    assert!(pending.is_empty());
}
