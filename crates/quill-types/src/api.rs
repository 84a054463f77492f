use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- Auth --

/// Request bodies keep every field optional so the handlers can report
/// missing fields through the validation taxonomy instead of a serde
/// rejection.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Public user projection — only the identity fields, never the email or
/// credential material.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
}

// -- Posts --

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PostPayload {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<PostResponse>,
    pub current_page: u64,
    pub total_pages: u64,
}

// -- Comments --

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CommentPayload {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub user_id: Option<i64>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentPage {
    pub comments: Vec<CommentResponse>,
    pub current_page: u64,
    pub total_pages: u64,
}
