use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};
use tracing::info;

use models::domains::{
    payments, players,
    sea_orm_active_enums::{PaymentStatus, PaymentType},
};
use models::schemas::payment::{PaymentIntentSchema, PaymentSchema};

use super::players::find_player;
use crate::cache::keys;
use crate::error::{AppError, AppResult, unique_violation};
use crate::payment::PaymentGateway;
use crate::state::AppState;

fn gateway(state: &AppState) -> AppResult<&Arc<dyn PaymentGateway>> {
    state
        .payments
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("Payments are not configured".into()))
}

/// Opens a gateway intent for the team-creation fee and records it as pending.
pub async fn create_payment_intent(
    state: &AppState,
    player_id: &str,
) -> AppResult<PaymentIntentSchema> {
    let gateway = gateway(state)?;
    let amount = state
        .config
        .team_creation_fee
        .ok_or_else(|| AppError::bad_request("Team creation does not require a payment"))?;

    let player = find_player(&state.conn, player_id).await?;
    if player.team_payment_paid {
        return Err(AppError::conflict("Team creation fee already paid"));
    }

    let currency = state.config.payment_currency.as_str();
    let intent = gateway.create_intent(amount, currency, player_id).await?;
    let client_secret = intent
        .client_secret
        .ok_or_else(|| AppError::Gateway("intent has no client secret".into()))?;

    let now = super::now();
    let payment = payments::ActiveModel {
        id: Set(super::new_id()),
        player_id: Set(player.id),
        amount: Set(amount),
        currency: Set(currency.to_owned()),
        payment_type: Set(PaymentType::TeamCreation),
        status: Set(PaymentStatus::Pending),
        gateway_payment_id: Set(intent.id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.conn)
    .await
    .map_err(|e| unique_violation(e, "Payment intent already recorded"))?;

    info!(payment_id = %payment.id, player_id, "Payment intent created");
    Ok(PaymentIntentSchema {
        payment: payment.into(),
        client_secret,
    })
}

/// Settles a pending payment once the gateway reports it succeeded. Confirming
/// an already completed payment returns it unchanged.
pub async fn confirm_payment(
    state: &AppState,
    player_id: &str,
    gateway_payment_id: &str,
) -> AppResult<PaymentSchema> {
    let payment = payments::Entity::find()
        .filter(payments::Column::GatewayPaymentId.eq(gateway_payment_id))
        .filter(payments::Column::PlayerId.eq(player_id))
        .one(&state.conn)
        .await?
        .ok_or_else(|| AppError::not_found("Payment not found"))?;
    if payment.status == PaymentStatus::Completed {
        return Ok(payment.into());
    }

    let intent = gateway(state)?.retrieve_intent(gateway_payment_id).await?;
    if !intent.is_succeeded() {
        return Err(AppError::bad_request(format!(
            "Payment has not succeeded (status: {})",
            intent.status
        )));
    }

    let txn = state.conn.begin().await?;

    let now = super::now();
    payments::Entity::update_many()
        .col_expr(payments::Column::Status, Expr::value(PaymentStatus::Completed))
        .col_expr(payments::Column::UpdatedAt, Expr::value(now))
        .filter(payments::Column::Id.eq(payment.id.as_str()))
        .filter(payments::Column::Status.eq(PaymentStatus::Pending))
        .exec(&txn)
        .await?;
    players::Entity::update_many()
        .col_expr(players::Column::TeamPaymentPaid, Expr::value(true))
        .col_expr(players::Column::UpdatedAt, Expr::value(now))
        .filter(players::Column::Id.eq(player_id))
        .exec(&txn)
        .await?;
    let payment = payments::Entity::find_by_id(payment.id.as_str())
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Payment not found"))?;

    txn.commit().await?;

    state.cache.delete(&[&keys::player_dashboard(player_id)]).await;
    info!(payment_id = %payment.id, player_id, "Payment confirmed");
    Ok(payment.into())
}

pub async fn list_payments(conn: &DbConn, player_id: &str) -> AppResult<Vec<PaymentSchema>> {
    let rows = payments::Entity::find()
        .filter(payments::Column::PlayerId.eq(player_id))
        .order_by_desc(payments::Column::CreatedAt)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(From::from).collect())
}
