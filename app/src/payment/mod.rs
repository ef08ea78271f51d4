//! Bridge to the external payment processor.

mod stripe;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AppResult;

pub use stripe::StripeGateway;

/// Gateway status of an intent that has been paid.
pub const INTENT_SUCCEEDED: &str = "succeeded";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PaymentIntent {
    pub id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    pub status: String,
    pub amount: i64,
    pub currency: String,
}

impl PaymentIntent {
    pub fn is_succeeded(&self) -> bool {
        self.status == INTENT_SUCCEEDED
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens an intent for `amount` minor units, tagged with the paying player.
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        player_id: &str,
    ) -> AppResult<PaymentIntent>;

    async fn retrieve_intent(&self, intent_id: &str) -> AppResult<PaymentIntent>;
}
