//! Manual chat-notification pings
//!
//! Both ping kinds carry whatever is typed into the form right now, even
//! an empty draft; the relay falls back to a generic line when the title
//! is blank. Each kind runs its own cooldown and its own in-flight guard,
//! and the cooldown stamp is only written once the relay accepts.

use super::effects::Effect;
use super::PortalEngine;
use crate::grievance::NotifyKind;
use crate::rate::{self, RateAction, RetryAfter};

impl PortalEngine {
    /// Ping the other party about the drafted grievance
    pub fn request_notify(&mut self, now_ms: f64) -> Vec<Effect> {
        if !self.authenticated || self.sending_notify || !self.config.has_relay_user() {
            return Vec::new();
        }

        if let Err(RetryAfter(seconds)) = rate::try_fire(
            self.durable_store.as_ref(),
            RateAction::Notification,
            now_ms,
        ) {
            let message = format!(
                "Please wait {} seconds before sending another notification.",
                seconds
            );
            self.set_notice(&message, now_ms);
            return Vec::new();
        }

        self.sending_notify = true;
        vec![Effect::SendNotification {
            kind: NotifyKind::Notify,
            automatic: false,
            title: self.form.title.clone(),
            description: self.form.description.clone(),
        }]
    }

    /// Demand immediate attention for the drafted grievance
    pub fn request_attention(&mut self, now_ms: f64) -> Vec<Effect> {
        if !self.authenticated || self.sending_attention || !self.config.has_relay_user() {
            return Vec::new();
        }

        if let Err(RetryAfter(seconds)) =
            rate::try_fire(self.durable_store.as_ref(), RateAction::Attention, now_ms)
        {
            let message = format!(
                "Please wait {} seconds before sending another attention ping.",
                seconds
            );
            self.set_notice(&message, now_ms);
            return Vec::new();
        }

        self.sending_attention = true;
        vec![Effect::SendNotification {
            kind: NotifyKind::Attention,
            automatic: false,
            title: self.form.title.clone(),
            description: self.form.description.clone(),
        }]
    }

    pub fn is_sending_notify(&self) -> bool {
        self.sending_notify
    }

    pub fn is_sending_attention(&self) -> bool {
        self.sending_attention
    }

    /// Completion for notification sends.
    ///
    /// The `automatic` flag echoes the effect that issued the call, so an
    /// automatic post-submission send can never settle a manual ping that
    /// is in flight at the same time. Automatic outcomes own no flag and
    /// no cooldown, and are absorbed silently: the confirmation overlay
    /// already claimed success.
    pub fn on_notify_result(&mut self, kind: NotifyKind, automatic: bool, ok: bool, now_ms: f64) {
        if automatic {
            return;
        }
        let was_sending = match kind {
            NotifyKind::Notify => std::mem::replace(&mut self.sending_notify, false),
            NotifyKind::Attention => std::mem::replace(&mut self.sending_attention, false),
        };
        if !was_sending {
            return;
        }

        if ok {
            let action = match kind {
                NotifyKind::Notify => RateAction::Notification,
                NotifyKind::Attention => RateAction::Attention,
            };
            rate::record_fired(self.durable_store.as_ref(), action, now_ms);
            return;
        }

        if self.authenticated {
            let message = match kind {
                NotifyKind::Notify => "Failed to send notification. Please try again.",
                NotifyKind::Attention => "Failed to send attention ping. Please try again.",
            };
            self.set_notice(message, now_ms);
        }
    }
}
