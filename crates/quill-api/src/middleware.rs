use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::AppState;
use crate::credentials;

/// The authenticated actor, inserted as a request extension for protected
/// handlers. Carries the presented plaintext token so logout can revoke it.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: i64,
    pub token: String,
}

/// Resolve the bearer token from the Authorization header against the token
/// store. Unknown and revoked tokens get the same 401 as a missing header.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::to_string);

    let Some(token) = token else {
        return unauthenticated();
    };

    match credentials::resolve_token(&state.db, &token) {
        Ok(Some(user_id)) => {
            req.extensions_mut().insert(AuthSession { user_id, token });
            next.run(req).await
        }
        Ok(None) => unauthenticated(),
        Err(err) => {
            error!("token resolution failed: {err:#}");
            crate::error::ApiError::Internal(err).into_response()
        }
    }
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "message": "Unauthenticated." })),
    )
        .into_response()
}
