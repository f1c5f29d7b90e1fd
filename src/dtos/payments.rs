use serde::{Deserialize, Serialize};

use super::parcels::UserInfoInput;
use crate::models::{Payment, UserInfo};

#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in minor currency units (cents).
    pub amount: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
}

/// Payment confirmation payload. Required fields are modeled as options so
/// the handler can answer a missing field with 400 instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSuccessRequest {
    pub parcel_id: Option<String>,
    pub amount: Option<u64>,
    pub user: Option<UserInfoInput>,
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSuccessResponse {
    pub message: String,
    pub already_recorded: bool,
}

#[derive(Debug, Deserialize)]
pub struct PaymentListParams {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub parcel_id: String,
    pub user: UserInfo,
    pub amount: u64,
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub created_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.map(|id| id.to_hex()).unwrap_or_default(),
            parcel_id: payment.parcel_id,
            user: payment.user,
            amount: payment.amount,
            transaction_id: payment.transaction_id,
            payment_method: payment.payment_method,
            created_at: payment.created_at.to_rfc3339(),
        }
    }
}
