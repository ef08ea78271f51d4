use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};
use tracing::info;

use models::domains::admins;

use crate::config::AdminSeed;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::password::hash_password;

/// Creates the configured admin account unless one with the same username or
/// email already exists.
pub async fn ensure_admin(state: &AppState, seed: &AdminSeed) -> AppResult<admins::Model> {
    let email = seed.email.to_lowercase();
    let existing = admins::Entity::find()
        .filter(
            Condition::any()
                .add(admins::Column::Username.eq(seed.username.as_str()))
                .add(admins::Column::Email.eq(email.as_str())),
        )
        .one(&state.conn)
        .await?;
    if let Some(admin) = existing {
        return Ok(admin);
    }

    let admin = admins::ActiveModel {
        id: Set(super::new_id()),
        username: Set(seed.username.clone()),
        email: Set(email),
        passhash: Set(hash_password(&seed.password, state.config.bcrypt_cost)?),
        created_at: Set(super::now()),
    }
    .insert(&state.conn)
    .await?;

    info!(username = %admin.username, "Seeded admin account");
    Ok(admin)
}
