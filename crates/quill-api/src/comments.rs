use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use quill_db::models::CommentRow;
use quill_types::api::{CommentPage, CommentPayload, CommentResponse};

use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::pagination::{self, PageQuery};
use crate::{AppState, guard, strings, timestamps, validate};

pub async fn get_paginated(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CommentPage>, ApiError> {
    let page = pagination::parse_page(query.page.as_deref())?;

    // Run blocking DB queries off the async runtime
    let db = state.clone();
    let (rows, total) = tokio::task::spawn_blocking(move || {
        let post = db.db.get_post(post_id)?.ok_or(ApiError::NotFound)?;

        let rows = db
            .db
            .list_comments(post.id, pagination::offset(page), pagination::PAGE_SIZE)?;
        let total = db.db.count_comments(post.id)?;
        Ok::<_, ApiError>((rows, total))
    })
    .await
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("spawn_blocking join error: {e}")))??;

    Ok(Json(CommentPage {
        comments: rows.into_iter().map(comment_response).collect(),
        current_page: page,
        total_pages: pagination::total_pages(total),
    }))
}

pub async fn create(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<CommentPayload>,
) -> Result<Json<CommentResponse>, ApiError> {
    let content = validate_payload(&payload)?;

    let post = state.db.get_post(post_id)?.ok_or(ApiError::NotFound)?;

    let comment = state.db.create_comment(post.id, session.user_id, content)?;

    Ok(Json(comment_response(comment)))
}

pub async fn update(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<CommentPayload>,
) -> Result<Json<CommentResponse>, ApiError> {
    let content = validate_payload(&payload)?;

    let post = state.db.get_post(post_id)?.ok_or(ApiError::NotFound)?;
    let comment = state
        .db
        .get_post_comment(post.id, comment_id)?
        .ok_or(ApiError::NotFound)?;

    // Moderation covers deletion only; editing stays with the comment owner.
    if !guard::can_update_comment(session.user_id, &comment) {
        return Err(ApiError::Unauthorised);
    }

    let updated = state
        .db
        .update_comment(comment.id, content)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(comment_response(updated)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Extension(session): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.db.get_post(post_id)?.ok_or(ApiError::NotFound)?;
    let comment = state
        .db
        .get_post_comment(post.id, comment_id)?
        .ok_or(ApiError::NotFound)?;

    if !guard::can_delete_comment(session.user_id, &comment, &post) {
        return Err(ApiError::Unauthorised);
    }

    state.db.delete_comment(comment.id)?;

    Ok(strings::COMMENT_DELETED)
}

fn validate_payload(payload: &CommentPayload) -> Result<&str, ApiError> {
    let mut errors = Vec::new();
    let content = validate::required("content", payload.content.as_deref(), &mut errors);

    if let Some(content) = content {
        validate::max_length("content", content, 65535, &mut errors);
    }

    let Some(content) = content else {
        return Err(ApiError::Validation(errors));
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    Ok(content)
}

pub(crate) fn comment_response(row: CommentRow) -> CommentResponse {
    CommentResponse {
        id: row.id,
        post_id: row.post_id,
        user_id: row.user_id,
        content: row.content,
        created_at: timestamps::parse_datetime(&row.created_at),
        updated_at: timestamps::parse_datetime(&row.updated_at),
    }
}
