use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use app::cache::CacheClient;
use app::config::{Config, ConfigInner};
use app::error::{AppError, AppResult};
use app::payment::{PaymentGateway, PaymentIntent};
use app::persistence::{organisers, players, teams, tournaments};
use app::state::AppState;
use models::domains::{organisers as organiser_entity, players as player_entity, teams as team_entity};
use models::domains::tournaments as tournament_entity;
use models::params::auth::RegisterParams;
use models::params::team::CreateTeamParams;
use models::params::tournament::CreateTournamentParams;
use utils::testing::setup_test_db;

pub async fn test_state(team_creation_fee: Option<i64>) -> AppState {
    let conn = setup_test_db("sqlite::memory:")
        .await
        .expect("Set up db failed!");

    let mut config = ConfigInner::new("sqlite::memory:", "test-secret");
    config.bcrypt_cost = 4;
    config.team_creation_fee = team_creation_fee;

    AppState::new(
        conn,
        Config::new(config),
        CacheClient::in_memory(Duration::from_secs(60)),
    )
}

fn register_params(username: &str) -> RegisterParams {
    RegisterParams {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "password123".to_string(),
    }
}

pub async fn player(state: &AppState, username: &str) -> player_entity::Model {
    players::register_player(state, register_params(username))
        .await
        .expect("Register player failed!")
}

pub async fn organiser(state: &AppState, username: &str) -> organiser_entity::Model {
    organisers::register_organiser(state, register_params(username))
        .await
        .expect("Register organiser failed!")
}

/// A team captained by `captain` with `members` admitted through join requests.
pub async fn team(
    state: &AppState,
    name: &str,
    captain: &player_entity::Model,
    members: &[&player_entity::Model],
) -> team_entity::Model {
    let team = teams::create_team(
        state,
        &captain.id,
        CreateTeamParams {
            name: name.to_string(),
        },
    )
    .await
    .expect("Create team failed!");

    for member in members {
        let request = teams::request_to_join_team(&state.conn, &team.id, &member.id)
            .await
            .expect("Join request failed!");
        teams::accept_join_request(state, &request.id, &captain.id)
            .await
            .expect("Accept join request failed!");
    }
    team
}

pub fn tournament_params(tid: &str, entry_fee: i64) -> CreateTournamentParams {
    let start = Utc::now().fixed_offset() + chrono::Duration::days(7);
    CreateTournamentParams {
        tid: tid.to_string(),
        name: format!("Cup {tid}"),
        description: "Weekend cup".to_string(),
        start_date: start,
        end_date: start + chrono::Duration::days(2),
        entry_fee,
        prize_pool: 10_000,
    }
}

pub async fn pending_tournament(
    state: &AppState,
    organiser: &organiser_entity::Model,
    tid: &str,
    entry_fee: i64,
) -> tournament_entity::Model {
    tournaments::create_tournament(&state.conn, &organiser.id, tournament_params(tid, entry_fee))
        .await
        .expect("Create tournament failed!")
}

pub async fn open_tournament(
    state: &AppState,
    organiser: &organiser_entity::Model,
    tid: &str,
    entry_fee: i64,
) -> tournament_entity::Model {
    let tournament = pending_tournament(state, organiser, tid, entry_fee).await;
    tournaments::approve_tournament(&state.conn, &tournament.id)
        .await
        .expect("Approve tournament failed!")
}

/// Gateway double: every intent it creates is reported with `status` when retrieved.
pub struct FakeGateway {
    status: Mutex<String>,
    pub created: Mutex<Vec<(i64, String, String)>>,
}

impl FakeGateway {
    pub fn new(status: &str) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status.to_string()),
            created: Mutex::new(Vec::new()),
        })
    }

    pub fn set_status(&self, status: &str) {
        *self.status.lock().unwrap() = status.to_string();
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        player_id: &str,
    ) -> AppResult<PaymentIntent> {
        let mut created = self.created.lock().unwrap();
        created.push((amount, currency.to_string(), player_id.to_string()));
        Ok(PaymentIntent {
            id: format!("pi_{}", created.len()),
            client_secret: Some(format!("pi_{}_secret", created.len())),
            status: "requires_payment_method".to_string(),
            amount,
            currency: currency.to_string(),
        })
    }

    async fn retrieve_intent(&self, intent_id: &str) -> AppResult<PaymentIntent> {
        if !intent_id.starts_with("pi_") {
            return Err(AppError::Gateway(format!("No such payment_intent: {intent_id}")));
        }
        Ok(PaymentIntent {
            id: intent_id.to_string(),
            client_secret: None,
            status: self.status.lock().unwrap().clone(),
            amount: 0,
            currency: "usd".to_string(),
        })
    }
}
