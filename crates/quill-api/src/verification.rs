use anyhow::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use uuid::Uuid;

use quill_db::Database;

/// Fresh verification token for a new registration. The 16 raw bytes are
/// stored on the user row; the string form travels in the activation link.
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Activation link payload: `base64("<uuid-string>:<email>")`.
pub fn encode_payload(token: Uuid, email: &str) -> String {
    B64.encode(format!("{token}:{email}"))
}

/// Inverse of [`encode_payload`]. Requires exactly one `:` separator and a
/// well-formed UUID on the left; anything else is None, never an error.
pub fn decode_payload(encoded: &str) -> Option<(Uuid, String)> {
    let bytes = B64.decode(encoded).ok()?;
    let text = String::from_utf8(bytes).ok()?;

    let mut parts = text.split(':');
    let (token, email) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || email.is_empty() {
        return None;
    }

    let uuid = Uuid::parse_str(token).ok()?;
    Some((uuid, email.to_string()))
}

/// Redeem an activation payload. Returns true only when the payload decodes
/// and the stored token bytes match exactly; the matching row update clears
/// the token and stamps `email_verified_at` in one conditional write, so a
/// second redemption with the same payload comes back false.
pub fn redeem(db: &Database, encoded: &str) -> Result<bool> {
    let Some((token, email)) = decode_payload(encoded) else {
        return Ok(false);
    };

    db.redeem_verification_token(&email, token.as_bytes())
}
