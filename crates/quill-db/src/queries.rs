use crate::Database;
use crate::models::{CommentRow, PostRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        verification_token: &[u8],
    ) -> Result<UserRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (name, email, password_hash, email_verification_token)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![name, email, password_hash, verification_token],
            )?;

            let id = conn.last_insert_rowid();
            query_user_by_id(conn, id)?
                .ok_or_else(|| anyhow::anyhow!("user {} vanished after insert", id))
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    /// Redeem an email-verification token: sets `email_verified_at` and clears
    /// the token in one conditional UPDATE, keyed on the exact stored bytes.
    /// Returns false when the email is unknown, the token was already cleared,
    /// or the bytes differ — two concurrent redemptions cannot both see true.
    pub fn redeem_verification_token(&self, email: &str, token: &[u8]) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE users
                 SET email_verified_at = datetime('now'),
                     email_verification_token = NULL,
                     updated_at = datetime('now')
                 WHERE email = ?1 AND email_verification_token = ?2",
                rusqlite::params![email, token],
            )?;
            Ok(changed == 1)
        })
    }

    // -- Access tokens --

    pub fn insert_access_token(&self, user_id: i64, token_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO access_tokens (user_id, token_hash) VALUES (?1, ?2)",
                rusqlite::params![user_id, token_hash],
            )?;
            Ok(())
        })
    }

    pub fn get_token_user(&self, token_hash: &str) -> Result<Option<i64>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT user_id FROM access_tokens WHERE token_hash = ?1",
                [token_hash],
                |row| row.get(0),
            )
            .optional()
        })
    }

    pub fn delete_access_token(&self, token_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM access_tokens WHERE token_hash = ?1",
                [token_hash],
            )?;
            Ok(())
        })
    }

    // -- Posts --

    pub fn create_post(&self, user_id: i64, title: &str, content: &str) -> Result<PostRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (user_id, title, content) VALUES (?1, ?2, ?3)",
                rusqlite::params![user_id, title, content],
            )?;

            let id = conn.last_insert_rowid();
            query_post_by_id(conn, id)?
                .ok_or_else(|| anyhow::anyhow!("post {} vanished after insert", id))
        })
    }

    pub fn get_post(&self, id: i64) -> Result<Option<PostRow>> {
        self.with_conn(|conn| query_post_by_id(conn, id))
    }

    pub fn list_posts(&self, offset: u64, limit: u64) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, content, created_at, updated_at
                 FROM posts
                 ORDER BY id ASC
                 LIMIT ?1 OFFSET ?2",
            )?;

            let rows = stmt
                .query_map(rusqlite::params![limit, offset], map_post_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn count_posts(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: u64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    pub fn update_post(&self, id: i64, title: &str, content: &str) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE posts
                 SET title = ?1, content = ?2, updated_at = datetime('now')
                 WHERE id = ?3",
                rusqlite::params![title, content, id],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            query_post_by_id(conn, id)
        })
    }

    /// Comments cascade via the post_id foreign key.
    pub fn delete_post(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
            Ok(())
        })
    }

    // -- Comments --

    pub fn create_comment(&self, post_id: i64, user_id: i64, content: &str) -> Result<CommentRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (post_id, user_id, content) VALUES (?1, ?2, ?3)",
                rusqlite::params![post_id, user_id, content],
            )?;

            let id = conn.last_insert_rowid();
            query_comment_by_id(conn, id)?
                .ok_or_else(|| anyhow::anyhow!("comment {} vanished after insert", id))
        })
    }

    /// Fetch a comment scoped to its owning post, so a comment id from another
    /// post resolves as not-found rather than leaking across posts.
    pub fn get_post_comment(&self, post_id: i64, comment_id: i64) -> Result<Option<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, post_id, user_id, content, created_at, updated_at
                 FROM comments
                 WHERE id = ?1 AND post_id = ?2",
            )?;

            stmt.query_row(rusqlite::params![comment_id, post_id], map_comment_row)
                .optional()
        })
    }

    pub fn list_comments(&self, post_id: i64, offset: u64, limit: u64) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, post_id, user_id, content, created_at, updated_at
                 FROM comments
                 WHERE post_id = ?1
                 ORDER BY id ASC
                 LIMIT ?2 OFFSET ?3",
            )?;

            let rows = stmt
                .query_map(rusqlite::params![post_id, limit, offset], map_comment_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn count_comments(&self, post_id: i64) -> Result<u64> {
        self.with_conn(|conn| {
            let count: u64 = conn.query_row(
                "SELECT COUNT(*) FROM comments WHERE post_id = ?1",
                [post_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    pub fn update_comment(&self, id: i64, content: &str) -> Result<Option<CommentRow>> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE comments
                 SET content = ?1, updated_at = datetime('now')
                 WHERE id = ?2",
                rusqlite::params![content, id],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            query_comment_by_id(conn, id)
        })
    }

    pub fn delete_comment(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM comments WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}

fn query_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, password_hash, email_verified_at,
                email_verification_token, created_at, updated_at
         FROM users WHERE email = ?1",
    )?;

    stmt.query_row([email], map_user_row).optional()
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, password_hash, email_verified_at,
                email_verification_token, created_at, updated_at
         FROM users WHERE id = ?1",
    )?;

    stmt.query_row([id], map_user_row).optional()
}

fn query_post_by_id(conn: &Connection, id: i64) -> Result<Option<PostRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, title, content, created_at, updated_at
         FROM posts WHERE id = ?1",
    )?;

    stmt.query_row([id], map_post_row).optional()
}

fn query_comment_by_id(conn: &Connection, id: i64) -> Result<Option<CommentRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, post_id, user_id, content, created_at, updated_at
         FROM comments WHERE id = ?1",
    )?;

    stmt.query_row([id], map_comment_row).optional()
}

fn map_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        email_verified_at: row.get(4)?,
        email_verification_token: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn map_post_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn map_comment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
