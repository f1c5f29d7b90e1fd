use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Parcel, UserInfo, PAYMENT_STATUS_UNPAID};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserInfoInput {
    pub uid: Option<String>,
    pub name: Option<String>,
    #[validate(email)]
    pub email: String,
}

impl From<UserInfoInput> for UserInfo {
    fn from(user: UserInfoInput) -> Self {
        Self {
            uid: user.uid,
            name: user.name,
            email: user.email,
        }
    }
}

/// Parcel creation payload. The shape is explicit: required owner snapshot,
/// optional shipping fields, and unknown fields are rejected rather than
/// persisted verbatim.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateParcelRequest {
    #[validate(nested)]
    pub user: UserInfoInput,
    pub parcel_type: Option<String>,
    pub title: Option<String>,
    pub weight_kg: Option<f64>,
    pub cost: Option<f64>,
    pub sender_address: Option<String>,
    pub receiver_name: Option<String>,
    pub receiver_address: Option<String>,
    pub receiver_phone: Option<String>,
    pub payment_status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<CreateParcelRequest> for Parcel {
    fn from(req: CreateParcelRequest) -> Self {
        Self {
            id: None,
            user: req.user.into(),
            parcel_type: req.parcel_type,
            title: req.title,
            weight_kg: req.weight_kg,
            cost: req.cost,
            sender_address: req.sender_address,
            receiver_name: req.receiver_name,
            receiver_address: req.receiver_address,
            receiver_phone: req.receiver_phone,
            payment_status: req
                .payment_status
                .unwrap_or_else(|| PAYMENT_STATUS_UNPAID.to_string()),
            created_at: req.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelListParams {
    pub user_email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelResponse {
    pub id: String,
    pub user: UserInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_phone: Option<String>,
    pub payment_status: String,
    pub created_at: String,
}

impl From<Parcel> for ParcelResponse {
    fn from(parcel: Parcel) -> Self {
        Self {
            id: parcel.id.map(|id| id.to_hex()).unwrap_or_default(),
            user: parcel.user,
            parcel_type: parcel.parcel_type,
            title: parcel.title,
            weight_kg: parcel.weight_kg,
            cost: parcel.cost,
            sender_address: parcel.sender_address,
            receiver_name: parcel.receiver_name,
            receiver_address: parcel.receiver_address,
            receiver_phone: parcel.receiver_phone,
            payment_status: parcel.payment_status,
            created_at: parcel.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedResponse {
    pub inserted_id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
