use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use models::domains::{
    organiser_banned_teams, organiser_followers, organiser_ratings, organisers, players, teams,
    tournaments, sea_orm_active_enums::TournamentStatus,
};
use models::params::{
    auth::RegisterParams,
    organiser::{UpdateOrganiserParams, VisibilityParams},
};
use models::schemas::{
    organiser::OrganiserProfileSchema, player::PlayerSummarySchema, team::TeamSummarySchema,
};

use crate::cache::keys;
use crate::error::{AppError, AppResult, unique_violation};
use crate::state::AppState;
use crate::utils::password::hash_password;

pub async fn find_organiser<C: ConnectionTrait>(db: &C, id: &str) -> AppResult<organisers::Model> {
    organisers::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Organiser not found"))
}

async fn ensure_available(
    conn: &DbConn,
    username: Option<&str>,
    email: Option<&str>,
    except: Option<&str>,
) -> AppResult<()> {
    let mut base = organisers::Entity::find();
    if let Some(id) = except {
        base = base.filter(organisers::Column::Id.ne(id));
    }
    if let Some(username) = username {
        let taken = base
            .clone()
            .filter(organisers::Column::Username.eq(username))
            .count(conn)
            .await?;
        if taken > 0 {
            return Err(AppError::conflict("Username already exists"));
        }
    }
    if let Some(email) = email {
        let taken = base
            .filter(organisers::Column::Email.eq(email))
            .count(conn)
            .await?;
        if taken > 0 {
            return Err(AppError::conflict("Email already exists"));
        }
    }
    Ok(())
}

pub async fn register_organiser(
    state: &AppState,
    params: RegisterParams,
) -> AppResult<organisers::Model> {
    let email = params.email.to_lowercase();
    ensure_available(&state.conn, Some(&params.username), Some(&email), None).await?;

    let passhash = hash_password(&params.password, state.config.bcrypt_cost)?;
    let now = super::now();
    let organiser = organisers::ActiveModel {
        id: Set(super::new_id()),
        username: Set(params.username),
        email: Set(email),
        passhash: Set(passhash),
        total_revenue: Set(0),
        rating: Set(0.0),
        rating_count: Set(0),
        show_revenue: Set(false),
        show_followers: Set(true),
        banned: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.conn)
    .await
    .map_err(|e| unique_violation(e, "Username or email already exists"))?;

    info!(organiser_id = %organiser.id, "Organiser registered");
    Ok(organiser)
}

pub async fn update_organiser(
    state: &AppState,
    id: &str,
    params: UpdateOrganiserParams,
) -> AppResult<organisers::Model> {
    let organiser = find_organiser(&state.conn, id).await?;
    let email = params.email.map(|e| e.to_lowercase());
    ensure_available(
        &state.conn,
        params.username.as_deref(),
        email.as_deref(),
        Some(id),
    )
    .await?;

    let mut active: organisers::ActiveModel = organiser.into();
    if let Some(username) = params.username {
        active.username = Set(username);
    }
    if let Some(email) = email {
        active.email = Set(email);
    }
    if let Some(password) = params.password {
        active.passhash = Set(hash_password(&password, state.config.bcrypt_cost)?);
    }
    active.updated_at = Set(super::now());
    let organiser = active
        .update(&state.conn)
        .await
        .map_err(|e| unique_violation(e, "Username or email already exists"))?;

    state.cache.delete(&[&keys::organiser_dashboard(id)]).await;
    Ok(organiser)
}

pub async fn update_visibility(
    state: &AppState,
    id: &str,
    params: VisibilityParams,
) -> AppResult<organisers::Model> {
    let organiser = find_organiser(&state.conn, id).await?;
    let mut active: organisers::ActiveModel = organiser.into();
    if let Some(show) = params.show_revenue {
        active.show_revenue = Set(show);
    }
    if let Some(show) = params.show_followers {
        active.show_followers = Set(show);
    }
    active.updated_at = Set(super::now());
    Ok(active.update(&state.conn).await?)
}

pub async fn follower_count<C: ConnectionTrait>(db: &C, organiser_id: &str) -> AppResult<u64> {
    Ok(organiser_followers::Entity::find()
        .filter(organiser_followers::Column::OrganiserId.eq(organiser_id))
        .count(db)
        .await?)
}

/// Public view honouring the organiser's visibility settings.
pub async fn public_profile(conn: &DbConn, id: &str) -> AppResult<OrganiserProfileSchema> {
    let organiser = find_organiser(conn, id).await?;
    if organiser.banned {
        return Err(AppError::not_found("Organiser not found"));
    }

    let tournaments_hosted = tournaments::Entity::find()
        .filter(tournaments::Column::OrganiserId.eq(id))
        .filter(tournaments::Column::Status.ne(TournamentStatus::Pending))
        .count(conn)
        .await?;
    let followers = match organiser.show_followers {
        true => Some(follower_count(conn, id).await?),
        false => None,
    };

    Ok(OrganiserProfileSchema {
        id: organiser.id,
        username: organiser.username,
        rating: organiser.rating,
        rating_count: organiser.rating_count,
        tournaments_hosted,
        total_revenue: organiser.show_revenue.then_some(organiser.total_revenue),
        followers,
    })
}

pub async fn list_followers(conn: &DbConn, organiser_id: &str) -> AppResult<Vec<PlayerSummarySchema>> {
    let rows = organiser_followers::Entity::find()
        .filter(organiser_followers::Column::OrganiserId.eq(organiser_id))
        .find_also_related(players::Entity)
        .order_by_desc(organiser_followers::Column::CreatedAt)
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(_, p)| p.map(From::from))
        .collect())
}

/// Bars a team from this organiser's tournaments.
pub async fn ban_team(conn: &DbConn, organiser_id: &str, team_id: &str) -> AppResult<()> {
    teams::Entity::find_by_id(team_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))?;

    organiser_banned_teams::ActiveModel {
        organiser_id: Set(organiser_id.to_owned()),
        team_id: Set(team_id.to_owned()),
        created_at: Set(super::now()),
    }
    .insert(conn)
    .await
    .map_err(|e| unique_violation(e, "Team already banned by this organiser"))?;

    info!(organiser_id, team_id, "Team banned by organiser");
    Ok(())
}

pub async fn unban_team(conn: &DbConn, organiser_id: &str, team_id: &str) -> AppResult<()> {
    let res = organiser_banned_teams::Entity::delete_by_id((organiser_id.to_owned(), team_id.to_owned()))
        .exec(conn)
        .await?;
    if res.rows_affected == 0 {
        return Err(AppError::not_found("Team is not banned by this organiser"));
    }
    Ok(())
}

pub async fn list_banned_teams(conn: &DbConn, organiser_id: &str) -> AppResult<Vec<TeamSummarySchema>> {
    let team_ids: Vec<String> = organiser_banned_teams::Entity::find()
        .filter(organiser_banned_teams::Column::OrganiserId.eq(organiser_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|b| b.team_id)
        .collect();

    let rows = teams::Entity::find()
        .filter(teams::Column::Id.is_in(team_ids))
        .order_by_asc(teams::Column::Name)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(From::from).collect())
}

/// Records or replaces the player's rating and refreshes the organiser's average.
pub async fn rate_organiser(
    state: &AppState,
    player_id: &str,
    organiser_id: &str,
    stars: i32,
) -> AppResult<organisers::Model> {
    let txn = state.conn.begin().await?;

    let organiser = find_organiser(&txn, organiser_id).await?;

    let existing = organiser_ratings::Entity::find_by_id((player_id.to_owned(), organiser_id.to_owned()))
        .one(&txn)
        .await?;
    match existing {
        Some(rating) => {
            let mut active: organiser_ratings::ActiveModel = rating.into();
            active.stars = Set(stars);
            active.update(&txn).await?;
        }
        None => {
            organiser_ratings::ActiveModel {
                player_id: Set(player_id.to_owned()),
                organiser_id: Set(organiser_id.to_owned()),
                stars: Set(stars),
                created_at: Set(super::now()),
            }
            .insert(&txn)
            .await?;
        }
    }

    let all: Vec<i32> = organiser_ratings::Entity::find()
        .filter(organiser_ratings::Column::OrganiserId.eq(organiser_id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|r| r.stars)
        .collect();
    let count = all.len() as i32;
    let average = all.iter().sum::<i32>() as f64 / count.max(1) as f64;

    let mut active: organisers::ActiveModel = organiser.into();
    active.rating = Set((average * 100.0).round() / 100.0);
    active.rating_count = Set(count);
    active.updated_at = Set(super::now());
    let organiser = active.update(&txn).await?;

    txn.commit().await?;

    state.cache.delete(&[&keys::organiser_dashboard(organiser_id)]).await;
    Ok(organiser)
}
