use reqwest::Client;
use tracing::{info, warn};
use uuid::Uuid;

use crate::verification;

/// Outbound verification email. Delivery is dispatched on a spawned task
/// after the user row is committed, so it never blocks the registration
/// response; failures are logged and the caller never sees them.
#[derive(Clone)]
pub struct Mailer {
    app_url: String,
    webhook_url: Option<String>,
    http: Client,
}

impl Mailer {
    pub fn new(app_url: String, webhook_url: Option<String>) -> Self {
        Self {
            app_url,
            webhook_url,
            http: Client::new(),
        }
    }

    pub fn send_verification(&self, recipient: &str, name: &str, token: Uuid) {
        let payload = verification::encode_payload(token, recipient);
        let link = format!(
            "{}/users/activate?t={}",
            self.app_url.trim_end_matches('/'),
            query_escape(&payload)
        );

        let Some(url) = self.webhook_url.clone() else {
            // No delivery target configured: surface the link in the log so
            // local setups can still complete the flow.
            info!("verification email for {}: {}", recipient, link);
            return;
        };

        let mail = serde_json::json!({
            "to": recipient,
            "subject": "Welcome! Please verify your email",
            "body": format!(
                "Hi {name}, please visit {link} to verify your email address"
            ),
        });

        let http = self.http.clone();
        let recipient = recipient.to_string();
        tokio::spawn(async move {
            match http.post(&url).json(&mail).send().await {
                Ok(resp) if resp.status().is_success() => {}
                Ok(resp) => warn!(
                    "verification email for {} rejected by webhook: {}",
                    recipient,
                    resp.status()
                ),
                Err(err) => warn!("verification email for {} failed: {}", recipient, err),
            }
        });
    }
}

/// The payload is standard base64, whose `+`, `/` and `=` need escaping
/// inside a query string.
fn query_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '+' => out.push_str("%2B"),
            '/' => out.push_str("%2F"),
            '=' => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}
