//! User route handlers.

use crate::http::error::ApiError;
use crate::http::extract::Auth;
use crate::http::AppState;
use crate::model::{AccountStatus, Role, UserId};
use crate::service::{ProfileUpdate, RegisterRequest, ServiceError};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccessBody {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Registration is the one unauthenticated write: it is how accounts come
/// to exist. New accounts default to the customer role; self-registration
/// may pick `agent` but never `admin`, which is granted only through the
/// admin-gated role update.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError> {
    let role = body
        .role
        .map(|r| Role::from_str(&r).map_err(ServiceError::Validation))
        .transpose()?;
    if role == Some(Role::Admin) {
        return Err(ApiError(ServiceError::Validation(
            "admin accounts cannot be created through registration".to_string(),
        )));
    }
    let request = RegisterRequest {
        name: body.name,
        email: body.email,
        password: body.password,
        role,
    };
    let user = state.service.register_user(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": user })),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Auth(actor): Auth,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let role = params
        .role
        .map(|r| Role::from_str(&r).map_err(ServiceError::Validation))
        .transpose()?;
    let users = state.service.list_users(&actor, role).await?;
    Ok(Json(json!({
        "success": true,
        "count": users.len(),
        "data": users,
    })))
}

/// Admin lever for role and account-status changes.
pub async fn change_access(
    State(state): State<AppState>,
    Auth(actor): Auth,
    Path(id): Path<String>,
    Json(body): Json<AccessBody>,
) -> Result<impl IntoResponse, ApiError> {
    if body.role.is_none() && body.status.is_none() {
        return Err(ApiError(ServiceError::Validation(
            "nothing to update: provide role or status".to_string(),
        )));
    }
    let id = UserId(id);
    let mut user = None;
    if let Some(role) = body.role {
        let role = Role::from_str(&role).map_err(ServiceError::Validation)?;
        user = Some(state.service.set_user_role(&actor, &id, role).await?);
    }
    if let Some(status) = body.status {
        let status = AccountStatus::from_str(&status).map_err(ServiceError::Validation)?;
        user = Some(state.service.set_user_status(&actor, &id, status).await?);
    }
    Ok(Json(json!({ "success": true, "data": user })))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Auth(actor): Auth,
    Path(id): Path<String>,
    Json(body): Json<ProfileBody>,
) -> Result<impl IntoResponse, ApiError> {
    let update = ProfileUpdate {
        name: body.name,
        phone: body.phone,
        address: body.address,
        avatar: body.avatar,
        password: body.password,
    };
    let user = state
        .service
        .update_profile(&actor, &UserId(id), update)
        .await?;
    Ok(Json(json!({ "success": true, "data": user })))
}

pub async fn remove(
    State(state): State<AppState>,
    Auth(actor): Auth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_user(&actor, &UserId(id)).await?;
    Ok(Json(json!({
        "success": true,
        "message": "User deleted successfully",
    })))
}
