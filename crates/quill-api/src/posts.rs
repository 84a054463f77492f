use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use quill_db::models::PostRow;
use quill_types::api::{PostPage, PostPayload, PostResponse};

use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::pagination::{self, PageQuery};
use crate::{AppState, guard, strings, timestamps, validate};

pub async fn get_paginated(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostPage>, ApiError> {
    let page = pagination::parse_page(query.page.as_deref())?;

    // Run blocking DB queries off the async runtime
    let db = state.clone();
    let (rows, total) = tokio::task::spawn_blocking(move || {
        let rows = db
            .db
            .list_posts(pagination::offset(page), pagination::PAGE_SIZE)?;
        let total = db.db.count_posts()?;
        Ok::<_, ApiError>((rows, total))
    })
    .await
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("spawn_blocking join error: {e}")))??;

    Ok(Json(PostPage {
        posts: rows.into_iter().map(post_response).collect(),
        current_page: page,
        total_pages: pagination::total_pages(total),
    }))
}

pub async fn get_singular(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.db.get_post(id)?.ok_or(ApiError::NotFound)?;

    Ok(Json(post_response(post)))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<PostPayload>,
) -> Result<Json<PostResponse>, ApiError> {
    let (title, content) = validate_payload(&payload)?;

    let post = state.db.create_post(session.user_id, title, content)?;

    Ok(Json(post_response(post)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<PostPayload>,
) -> Result<Json<PostResponse>, ApiError> {
    let (title, content) = validate_payload(&payload)?;

    let post = state.db.get_post(id)?.ok_or(ApiError::NotFound)?;

    if !guard::can_mutate_post(session.user_id, &post) {
        return Err(ApiError::Unauthorised);
    }

    let updated = state
        .db
        .update_post(post.id, title, content)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(post_response(updated)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(session): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.db.get_post(id)?.ok_or(ApiError::NotFound)?;

    if !guard::can_mutate_post(session.user_id, &post) {
        return Err(ApiError::Unauthorised);
    }

    state.db.delete_post(post.id)?;

    Ok(strings::POST_DELETED)
}

fn validate_payload(payload: &PostPayload) -> Result<(&str, &str), ApiError> {
    let mut errors = Vec::new();
    let title = validate::required("title", payload.title.as_deref(), &mut errors);
    let content = validate::required("content", payload.content.as_deref(), &mut errors);

    if let Some(title) = title {
        validate::max_length("title", title, 255, &mut errors);
    }
    if let Some(content) = content {
        validate::max_length("content", content, 65535, &mut errors);
    }

    let (Some(title), Some(content)) = (title, content) else {
        return Err(ApiError::Validation(errors));
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    Ok((title, content))
}

pub(crate) fn post_response(row: PostRow) -> PostResponse {
    PostResponse {
        id: row.id,
        user_id: row.user_id,
        title: row.title,
        content: row.content,
        created_at: timestamps::parse_datetime(&row.created_at),
        updated_at: timestamps::parse_datetime(&row.updated_at),
    }
}
