//! Payment handlers.
//!
//! Implements payment intent creation against Stripe, payment confirmation
//! recording, and payment history listing.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::{
    dtos::{
        CreatePaymentIntentRequest, CreatePaymentIntentResponse, PaymentListParams,
        PaymentResponse, PaymentSuccessRequest, PaymentSuccessResponse,
    },
    error::AppError,
    models::Payment,
    startup::AppState,
};

/// Create a Stripe payment intent and return its client secret.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentIntentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>, AppError> {
    tracing::info!(amount = payload.amount, "Creating Stripe payment intent");

    let intent = state
        .stripe
        .create_payment_intent(payload.amount, "usd")
        .await
        .map_err(|e| AppError::PaymentProviderError(e.to_string()))?;

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// Record a completed payment: mark the parcel paid, then insert the
/// payment record.
///
/// The two writes are not transactional. The parcel update runs first and
/// its match count is checked, so a payment is never recorded against a
/// parcel that does not exist. Replays carrying an already-recorded
/// transaction id return 200 without writing anything.
pub async fn payment_success(
    State(state): State<AppState>,
    Json(payload): Json<PaymentSuccessRequest>,
) -> Result<Json<PaymentSuccessResponse>, AppError> {
    let parcel_id = payload
        .parcel_id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("parcelId is required")))?;
    let amount = payload
        .amount
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("amount is required")))?;
    let user = payload
        .user
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("user is required")))?;
    let transaction_id = payload
        .transaction_id
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("transactionId is required")))?;

    let parcel_oid = ObjectId::parse_str(&parcel_id)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid parcel ID")))?;

    // Idempotency guard: a retried confirmation must not duplicate the record
    if let Some(existing) = state
        .repository
        .find_payment_by_transaction_id(&transaction_id)
        .await?
    {
        tracing::info!(
            transaction_id = %transaction_id,
            parcel_id = %existing.parcel_id,
            "Payment already recorded, skipping"
        );
        return Ok(Json(PaymentSuccessResponse {
            message: "Payment already recorded".to_string(),
            already_recorded: true,
        }));
    }

    let matched = state.repository.mark_parcel_paid(parcel_oid).await?;
    if !matched {
        return Err(AppError::NotFound(anyhow::anyhow!("Parcel not found")));
    }

    let payment = Payment {
        id: None,
        parcel_id: parcel_oid.to_hex(),
        user: user.into(),
        amount,
        transaction_id: transaction_id.clone(),
        payment_method: payload.payment_method,
        created_at: Utc::now(),
    };

    state.repository.insert_payment(payment).await.map_err(|e| {
        // The parcel is already marked paid at this point; surface the
        // divergence so it can be reconciled.
        tracing::error!(
            parcel_id = %parcel_id,
            transaction_id = %transaction_id,
            "Parcel marked paid but payment record insert failed: {}",
            e
        );
        e
    })?;

    tracing::info!(
        parcel_id = %parcel_id,
        transaction_id = %transaction_id,
        amount = amount,
        "Payment recorded"
    );

    Ok(Json(PaymentSuccessResponse {
        message: "Payment recorded successfully".to_string(),
        already_recorded: false,
    }))
}

/// List payments, newest first, optionally filtered by payer email.
pub async fn list_payments(
    State(state): State<AppState>,
    Query(params): Query<PaymentListParams>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let payments = state.repository.list_payments(params.email.as_deref()).await?;

    Ok(Json(
        payments.into_iter().map(PaymentResponse::from).collect(),
    ))
}
