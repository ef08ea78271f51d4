use sea_orm::{ColumnTrait, Condition, DbConn, EntityTrait, QueryFilter};

use models::domains::{admins, organisers, players};
use models::params::auth::LoginParams;
use models::schemas::auth::{Principal, Role, TokenSubject};

use crate::error::{AppError, AppResult};
use crate::utils::password::verify_password;

struct Account {
    id: String,
    username: String,
    passhash: String,
    banned: bool,
}

async fn find_account(conn: &DbConn, role: Role, identifier: &str) -> AppResult<Option<Account>> {
    let email = identifier.to_lowercase();
    let account = match role {
        Role::Player => players::Entity::find()
            .filter(
                Condition::any()
                    .add(players::Column::Username.eq(identifier))
                    .add(players::Column::Email.eq(email.as_str())),
            )
            .one(conn)
            .await?
            .map(|p| Account {
                id: p.id,
                username: p.username,
                passhash: p.passhash,
                banned: p.banned,
            }),
        Role::Organiser => organisers::Entity::find()
            .filter(
                Condition::any()
                    .add(organisers::Column::Username.eq(identifier))
                    .add(organisers::Column::Email.eq(email.as_str())),
            )
            .one(conn)
            .await?
            .map(|o| Account {
                id: o.id,
                username: o.username,
                passhash: o.passhash,
                banned: o.banned,
            }),
        Role::Admin => admins::Entity::find()
            .filter(
                Condition::any()
                    .add(admins::Column::Username.eq(identifier))
                    .add(admins::Column::Email.eq(email.as_str())),
            )
            .one(conn)
            .await?
            .map(|a| Account {
                id: a.id,
                username: a.username,
                passhash: a.passhash,
                banned: false,
            }),
    };
    Ok(account)
}

/// Checks credentials for the given role. Banned accounts are refused even
/// with a correct password.
pub async fn login(conn: &DbConn, role: Role, params: LoginParams) -> AppResult<Principal> {
    let account = find_account(conn, role, params.identifier.trim())
        .await?
        .filter(|a| verify_password(&params.password, &a.passhash))
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    if account.banned {
        return Err(AppError::forbidden("Account is banned"));
    }

    Ok(Principal {
        id: account.id,
        username: account.username,
        role,
        banned: account.banned,
    })
}

/// Loads the current state of a token's subject. `None` when the account no
/// longer exists.
pub async fn resolve_principal(conn: &DbConn, subject: &TokenSubject) -> AppResult<Option<Principal>> {
    let principal = match subject.role {
        Role::Player => players::Entity::find_by_id(subject.id.as_str())
            .one(conn)
            .await?
            .map(|p| (p.username, p.banned)),
        Role::Organiser => organisers::Entity::find_by_id(subject.id.as_str())
            .one(conn)
            .await?
            .map(|o| (o.username, o.banned)),
        Role::Admin => admins::Entity::find_by_id(subject.id.as_str())
            .one(conn)
            .await?
            .map(|a| (a.username, false)),
    };

    Ok(principal.map(|(username, banned)| Principal {
        id: subject.id.clone(),
        username,
        role: subject.role,
        banned,
    }))
}
