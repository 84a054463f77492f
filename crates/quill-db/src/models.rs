/// Database row types — these map directly to SQLite rows.
/// Distinct from the quill-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub email_verified_at: Option<String>,
    pub email_verification_token: Option<Vec<u8>>,
    pub created_at: String,
    pub updated_at: String,
}

impl UserRow {
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

pub struct PostRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub user_id: Option<i64>,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}
