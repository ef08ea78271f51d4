use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use super::{PaymentGateway, PaymentIntent};
use crate::error::{AppError, AppResult};

const STRIPE_API: &str = "https://api.stripe.com/v1";

/// Stripe client over raw HTTPS calls.
#[derive(Clone)]
pub struct StripeGateway {
    secret_key: String,
    client: Client,
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            client: Client::new(),
        }
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Value> {
        let resp = request
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("request failed: {e}")))?;

        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("unreadable response: {e}")))?;

        if !status.is_success() {
            let msg = body["error"]["message"]
                .as_str()
                .unwrap_or("unknown Stripe error");
            return Err(AppError::Gateway(msg.to_string()));
        }
        Ok(body)
    }

    fn parse_intent(body: Value) -> AppResult<PaymentIntent> {
        serde_json::from_value(body)
            .map_err(|e| AppError::Gateway(format!("unexpected intent payload: {e}")))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
        player_id: &str,
    ) -> AppResult<PaymentIntent> {
        let amount = amount.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("automatic_payment_methods[enabled]", "true"),
            ("metadata[playerId]", player_id),
            ("metadata[paymentType]", "TEAM_CREATION"),
        ];
        let body = self
            .send(
                self.client
                    .post(format!("{STRIPE_API}/payment_intents"))
                    .form(&params),
            )
            .await?;
        Self::parse_intent(body)
    }

    async fn retrieve_intent(&self, intent_id: &str) -> AppResult<PaymentIntent> {
        let body = self
            .send(
                self.client
                    .get(format!("{STRIPE_API}/payment_intents/{intent_id}")),
            )
            .await?;
        Self::parse_intent(body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_intent_payload() {
        let intent = StripeGateway::parse_intent(json!({
            "id": "pi_123",
            "object": "payment_intent",
            "amount": 500,
            "currency": "usd",
            "client_secret": "pi_123_secret_abc",
            "status": "requires_payment_method"
        }))
        .unwrap();

        assert_eq!(intent.id, "pi_123");
        assert_eq!(intent.client_secret.as_deref(), Some("pi_123_secret_abc"));
        assert!(!intent.is_succeeded());
    }

    #[test]
    fn malformed_payload_is_a_gateway_error() {
        let err = StripeGateway::parse_intent(json!({ "id": "pi_1" })).unwrap_err();
        assert!(matches!(err, AppError::Gateway(_)));
    }
}
