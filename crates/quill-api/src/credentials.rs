use anyhow::Result;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use rand::RngCore;
use sha2::{Digest, Sha256};

use quill_db::Database;

/// Hash a password with Argon2id and a fresh salt. Output is a PHC string.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();

    Ok(hash)
}

/// A hash that fails to parse verifies false rather than erroring; stored
/// hashes are always PHC strings we produced ourselves.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Issue a new bearer token for a user. Only the sha256 digest of the
/// plaintext is persisted; the plaintext is returned exactly once and can
/// never be recovered from the store.
pub fn issue_token(db: &Database, user_id: i64) -> Result<String> {
    let mut raw = [0u8; 32];
    rand::rng().fill_bytes(&mut raw);
    let token = hex::encode(raw);

    db.insert_access_token(user_id, &digest(&token))?;

    Ok(token)
}

/// Resolve a presented bearer token to its user. Unknown and revoked tokens
/// both come back as None.
pub fn resolve_token(db: &Database, token: &str) -> Result<Option<i64>> {
    db.get_token_user(&digest(token))
}

/// Delete the token's association. Idempotent.
pub fn revoke_token(db: &Database, token: &str) -> Result<()> {
    db.delete_access_token(&digest(token))
}

fn digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
