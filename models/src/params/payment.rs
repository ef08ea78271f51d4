use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentParams {
    #[validate(length(min = 1))]
    pub payment_intent_id: String,
}
