use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use tracing::error;

use quill_types::api::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};

use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::{AppState, credentials, strings, validate, verification, views};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut errors = Vec::new();
    let name = validate::required("name", req.name.as_deref(), &mut errors);
    let email = validate::required("email", req.email.as_deref(), &mut errors);
    let password = validate::required("password", req.password.as_deref(), &mut errors);

    if let Some(email) = email {
        if !validate::is_valid_email(email) {
            errors.push("The email field must be a valid email address.".into());
        }
    }

    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(ApiError::Validation(errors));
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if !validate::password_complexity(password) {
        return Err(ApiError::Validation(vec![
            strings::REGISTER_PASSWORD_COMPLEXITY.into(),
        ]));
    }

    // Duplicate check is a case-sensitive exact match, before any row exists.
    if state.db.get_user_by_email(email)?.is_some() {
        return Err(ApiError::Validation(vec![
            strings::REGISTER_EXISTING_USER.into(),
        ]));
    }

    let password_hash = credentials::hash_password(password)?;
    let token = verification::generate();

    let user = state
        .db
        .create_user(name, email, &password_hash, token.as_bytes())?;

    // Fire-and-forget: the registration response never waits on delivery.
    state.mailer.send_verification(&user.email, &user.name, token);

    Ok(strings::register_success(email))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let mut errors = Vec::new();
    let email = validate::required("email", req.email.as_deref(), &mut errors);
    let password = validate::required("password", req.password.as_deref(), &mut errors);

    let (Some(email), Some(password)) = (email, password) else {
        return Err(ApiError::Validation(errors));
    };

    // Before we authenticate, make sure this account exists
    let user = state
        .db
        .get_user_by_email(email)?
        .ok_or(ApiError::Authentication)?;

    // Unverified accounts are refused before the password is ever compared,
    // so a correct-password signal cannot leak for them.
    if !user.is_verified() {
        return Err(ApiError::Unverified);
    }

    if !credentials::verify_password(password, &user.password_hash) {
        return Err(ApiError::Authentication);
    }

    let token = credentials::issue_token(&state.db, user.id)?;

    Ok(Json(LoginResponse { token }))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    credentials::revoke_token(&state.db, &session.token)?;

    Ok(strings::LOGOUT_SUCCESS)
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.db.get_user_by_id(id)?.ok_or(ApiError::NotFound)?;

    Ok(Json(UserResponse {
        id: user.id,
        name: user.name,
    }))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ActivateQuery {
    pub t: Option<String>,
}

/// Activation always renders one of two views; even a storage failure is
/// logged and shown as the failure page.
pub async fn activate(
    State(state): State<AppState>,
    Query(query): Query<ActivateQuery>,
) -> Html<&'static str> {
    let Some(payload) = query.t else {
        return Html(views::ACTIVATION_FAILURE);
    };

    match verification::redeem(&state.db, &payload) {
        Ok(true) => Html(views::ACTIVATION_SUCCESS),
        Ok(false) => Html(views::ACTIVATION_FAILURE),
        Err(err) => {
            error!("activation redemption failed: {err:#}");
            Html(views::ACTIVATION_FAILURE)
        }
    }
}
