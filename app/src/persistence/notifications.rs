use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

use models::domains::notifications;
use models::schemas::organiser::NotificationSchema;

use crate::error::{AppError, AppResult};

/// Queues a message for the organiser. Runs on whatever connection or
/// transaction the caller is using.
pub async fn notify<C: ConnectionTrait>(
    db: &C,
    organiser_id: &str,
    message: String,
) -> Result<notifications::Model, DbErr> {
    notifications::ActiveModel {
        organiser_id: Set(organiser_id.to_owned()),
        message: Set(message),
        read: Set(false),
        created_at: Set(super::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn list_notifications(
    conn: &DbConn,
    organiser_id: &str,
) -> AppResult<Vec<NotificationSchema>> {
    let rows = notifications::Entity::find()
        .filter(notifications::Column::OrganiserId.eq(organiser_id))
        .order_by_desc(notifications::Column::CreatedAt)
        .order_by_desc(notifications::Column::Id)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(From::from).collect())
}

pub async fn mark_read(conn: &DbConn, organiser_id: &str, id: i32) -> AppResult<()> {
    let res = notifications::Entity::update_many()
        .col_expr(notifications::Column::Read, Expr::value(true))
        .filter(notifications::Column::Id.eq(id))
        .filter(notifications::Column::OrganiserId.eq(organiser_id))
        .exec(conn)
        .await?;
    if res.rows_affected == 0 {
        return Err(AppError::not_found("Notification not found"));
    }
    Ok(())
}

/// Returns how many notifications flipped to read.
pub async fn mark_all_read(conn: &DbConn, organiser_id: &str) -> AppResult<u64> {
    let res = notifications::Entity::update_many()
        .col_expr(notifications::Column::Read, Expr::value(true))
        .filter(notifications::Column::OrganiserId.eq(organiser_id))
        .filter(notifications::Column::Read.eq(false))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
