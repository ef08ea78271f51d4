use axum::http::StatusCode;

use app::persistence::{payments, players, teams};
use models::domains::sea_orm_active_enums::PaymentStatus;
use models::params::team::CreateTeamParams;

use crate::common::*;

#[tokio::test]
async fn team_creation_requires_a_confirmed_payment() {
    let gateway = FakeGateway::new("requires_payment_method");
    let state = test_state(Some(2_500)).await.with_payments(gateway.clone());
    let founder = player(&state, "founder").await;
    let params = || CreateTeamParams {
        name: "Alpha".to_string(),
    };

    let err = teams::create_team(&state, &founder.id, params()).await.unwrap_err();
    assert_eq!(err.code(), StatusCode::FORBIDDEN);

    let intent = payments::create_payment_intent(&state, &founder.id).await.unwrap();
    assert_eq!(intent.payment.status, PaymentStatus::Pending);
    assert_eq!(intent.payment.amount, 2_500);
    assert_eq!(
        gateway.created.lock().unwrap()[0],
        (2_500, "usd".to_string(), founder.id.clone())
    );

    let gateway_id = intent.payment.gateway_payment_id.clone();
    let err = payments::confirm_payment(&state, &founder.id, &gateway_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::BAD_REQUEST);

    gateway.set_status("succeeded");
    let payment = payments::confirm_payment(&state, &founder.id, &gateway_id)
        .await
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Completed);
    // Confirming twice is harmless.
    payments::confirm_payment(&state, &founder.id, &gateway_id)
        .await
        .unwrap();

    let err = payments::create_payment_intent(&state, &founder.id).await.unwrap_err();
    assert_eq!(err.code(), StatusCode::CONFLICT);

    teams::create_team(&state, &founder.id, params()).await.unwrap();
    let founder = players::find_player(&state.conn, &founder.id).await.unwrap();
    assert!(!founder.team_payment_paid);
    assert_eq!(payments::list_payments(&state.conn, &founder.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn payments_need_a_gateway_and_a_fee() {
    let state = test_state(Some(2_500)).await;
    let buyer = player(&state, "buyer").await;
    let err = payments::create_payment_intent(&state, &buyer.id).await.unwrap_err();
    assert_eq!(err.code(), StatusCode::SERVICE_UNAVAILABLE);

    let state = test_state(None).await.with_payments(FakeGateway::new("succeeded"));
    let buyer = player(&state, "buyer").await;
    let err = payments::create_payment_intent(&state, &buyer.id).await.unwrap_err();
    assert_eq!(err.code(), StatusCode::BAD_REQUEST);

    let err = payments::confirm_payment(&state, &buyer.id, "pi_unknown")
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::NOT_FOUND);
}
