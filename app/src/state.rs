use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{cache::CacheClient, config::Config, payment::PaymentGateway};

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub config: Config,
    pub cache: CacheClient,
    /// `None` when no gateway is configured; payment endpoints answer 503.
    pub payments: Option<Arc<dyn PaymentGateway>>,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, config: Config, cache: CacheClient) -> Self {
        Self {
            conn,
            config,
            cache,
            payments: None,
        }
    }

    pub fn with_payments(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.payments = Some(gateway);
        self
    }
}
