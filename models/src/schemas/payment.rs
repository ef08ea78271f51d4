use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domains::{
    payments,
    sea_orm_active_enums::{PaymentStatus, PaymentType},
};

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchema {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    pub gateway_payment_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<payments::Model> for PaymentSchema {
    fn from(payment: payments::Model) -> Self {
        Self {
            id: payment.id,
            amount: payment.amount,
            currency: payment.currency,
            payment_type: payment.payment_type,
            status: payment.status,
            gateway_payment_id: payment.gateway_payment_id,
            created_at: payment.created_at.to_utc(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentSchema {
    pub payment: PaymentSchema,
    pub client_secret: String,
}
