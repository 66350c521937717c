//! Notification relay request and webhook formatting
//!
//! One message shape serves both sides: the browser client serializes a
//! [`RelayRequest`], and the relay binary deserializes it and turns it
//! into the outbound webhook payload.

use portal_core::NotifyKind;
use serde::{Deserialize, Serialize};

/// Body accepted by the relay endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub user_id: String,
    #[serde(rename = "type", default)]
    pub kind: NotifyKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl RelayRequest {
    /// Chat message line for this request.
    ///
    /// An untitled draft falls back to a generic line, and the attention
    /// kind prepends its banner.
    pub fn format_content(&self) -> String {
        let base = if self.title.is_empty() {
            "A new grievance was submitted.".to_string()
        } else {
            format!("New grievance: {}", self.title)
        };
        let extra = if self.description.is_empty() {
            String::new()
        } else {
            format!("\n> {}", self.description)
        };
        match self.kind {
            NotifyKind::Attention => format!(
                "<@{}> \u{1F6A8} ATTENTION NEEDED \u{1F6A8}\n{}{}",
                self.user_id, base, extra
            ),
            NotifyKind::Notify => format!("<@{}> {}{}", self.user_id, base, extra),
        }
    }

    /// Webhook body for this request.
    ///
    /// `allowed_mentions` pins the mention list to exactly the configured
    /// user, so relayed text can never broadcast-mention.
    pub fn webhook_payload(&self) -> WebhookPayload {
        WebhookPayload {
            content: self.format_content(),
            allowed_mentions: AllowedMentions {
                parse: Vec::new(),
                users: vec![self.user_id.clone()],
            },
        }
    }
}

/// Outbound chat-webhook body
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WebhookPayload {
    pub content: String,
    pub allowed_mentions: AllowedMentions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
    pub users: Vec<String>,
}
