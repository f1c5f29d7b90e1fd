//! Parcel CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    dtos::{
        CreateParcelRequest, InsertedResponse, MessageResponse, ParcelListParams, ParcelResponse,
    },
    error::AppError,
    models::Parcel,
    startup::AppState,
};

fn parse_parcel_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid parcel ID")))
}

/// List parcels, newest first, optionally filtered by owner email.
pub async fn list_parcels(
    State(state): State<AppState>,
    Query(params): Query<ParcelListParams>,
) -> Result<Json<Vec<ParcelResponse>>, AppError> {
    let parcels = state
        .repository
        .list_parcels(params.user_email.as_deref())
        .await?;

    Ok(Json(parcels.into_iter().map(ParcelResponse::from).collect()))
}

/// Get a parcel by ID. A malformed id is rejected before any query runs.
pub async fn get_parcel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ParcelResponse>, AppError> {
    let parcel_id = parse_parcel_id(&id)?;

    let parcel = state
        .repository
        .get_parcel(parcel_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Parcel not found")))?;

    Ok(Json(ParcelResponse::from(parcel)))
}

/// Create a new parcel.
pub async fn create_parcel(
    State(state): State<AppState>,
    Json(payload): Json<CreateParcelRequest>,
) -> Result<(StatusCode, Json<InsertedResponse>), AppError> {
    payload.validate()?;

    let parcel = Parcel::from(payload);

    tracing::info!(
        owner_email = %parcel.user.email,
        "Creating parcel"
    );

    let inserted_id = state.repository.insert_parcel(parcel).await?;

    Ok((
        StatusCode::CREATED,
        Json(InsertedResponse {
            inserted_id: inserted_id.to_hex(),
        }),
    ))
}

/// Delete a parcel by ID.
pub async fn delete_parcel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let parcel_id = parse_parcel_id(&id)?;

    let deleted = state.repository.delete_parcel(parcel_id).await?;
    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Parcel not found")));
    }

    tracing::info!(parcel_id = %id, "Parcel deleted");

    Ok(Json(MessageResponse {
        message: "Parcel deleted successfully".to_string(),
    }))
}
