//! Parcel route handlers.

use crate::http::error::ApiError;
use crate::http::extract::Auth;
use crate::http::AppState;
use crate::model::{ParcelId, ParcelStatus, UserId};
use crate::service::{CreateParcelRequest, ServiceError, UpdateRequest};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use std::str::FromStr;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParcelBody {
    #[serde(default)]
    sender_info: PartyBody,
    #[serde(default)]
    receiver_info: PartyBody,
    #[serde(default)]
    description: String,
    #[serde(default)]
    weight: f64,
    #[serde(default)]
    cost: f64,
}

/// Sender or receiver details. Every field optional; required receiver
/// fields are enforced by draft validation so the error is a 400, not a
/// body-shape rejection.
#[derive(Debug, Default, Deserialize)]
struct PartyBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParcelBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    note: Option<String>,
    /// Absent means "leave the assignment alone"; an explicit `null` means
    /// "remove the agent".
    #[serde(default, deserialize_with = "double_option")]
    assigned_agent_id: Option<Option<String>>,
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}

pub async fn create(
    State(state): State<AppState>,
    Auth(actor): Auth,
    Json(body): Json<CreateParcelBody>,
) -> Result<impl IntoResponse, ApiError> {
    let request = CreateParcelRequest {
        sender_name: body.sender_info.name,
        sender_email: body.sender_info.email,
        sender_address: body.sender_info.address,
        sender_phone: body.sender_info.phone,
        receiver_name: body.receiver_info.name.unwrap_or_default(),
        receiver_address: body.receiver_info.address.unwrap_or_default(),
        receiver_phone: body.receiver_info.phone,
        description: body.description,
        weight: body.weight,
        cost: body.cost,
    };
    let parcel = state.service.create_parcel(&actor, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": parcel })),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Auth(actor): Auth,
) -> Result<impl IntoResponse, ApiError> {
    let parcels = state.service.list_parcels(&actor).await?;
    Ok(Json(json!({
        "success": true,
        "count": parcels.len(),
        "data": parcels,
    })))
}

pub async fn find(
    State(state): State<AppState>,
    Auth(_actor): Auth,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let parcel = state.service.find_parcel(&key).await?;
    Ok(Json(json!({ "success": true, "data": parcel })))
}

pub async fn update(
    State(state): State<AppState>,
    Auth(actor): Auth,
    Path(key): Path<String>,
    Json(body): Json<UpdateParcelBody>,
) -> Result<impl IntoResponse, ApiError> {
    let status = body
        .status
        .map(|s| ParcelStatus::from_str(&s).map_err(ServiceError::Validation))
        .transpose()?;
    let request = UpdateRequest {
        status,
        note: body.note,
        assigned_agent_id: body.assigned_agent_id.map(|a| a.map(UserId)),
    };
    let parcel = state
        .service
        .update_parcel(&actor, &ParcelId(key), request)
        .await?;
    Ok(Json(json!({ "success": true, "data": parcel })))
}

pub async fn remove(
    State(state): State<AppState>,
    Auth(actor): Auth,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_parcel(&actor, &ParcelId(key)).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Parcel deleted successfully",
    })))
}

/// Public tracking: no authentication, the key is the capability.
pub async fn track(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let parcel = state.resolver.track(&key).await?;
    Ok(Json(json!({ "success": true, "data": parcel })))
}
