//! Persistent cooldown gate for outbound actions
//!
//! Last-fired timestamps live in the durable per-origin store so cooldowns
//! survive reloads. Callers check with [`try_fire`] before acting and call
//! [`record_fired`] only after the gated action itself succeeds; a failed
//! remote call must not consume the cooldown.

use crate::store::StateStore;

/// Cooldown before another grievance can be submitted (30 s)
pub const SUBMISSION_COOLDOWN_MS: f64 = 30_000.0;

/// Cooldown between manual chat notifications (60 s)
pub const NOTIFICATION_COOLDOWN_MS: f64 = 60_000.0;

/// Cooldown between attention pings (60 s)
pub const ATTENTION_COOLDOWN_MS: f64 = 60_000.0;

/// A rate-limited action, keyed into durable storage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateAction {
    Submission,
    Notification,
    Attention,
}

impl RateAction {
    /// Durable storage key holding the last-fired timestamp
    pub fn storage_key(&self) -> &'static str {
        match self {
            RateAction::Submission => "lastSubmission",
            RateAction::Notification => "lastNotification",
            RateAction::Attention => "lastAttention",
        }
    }

    /// Minimum elapsed time between two permitted firings
    pub fn cooldown_ms(&self) -> f64 {
        match self {
            RateAction::Submission => SUBMISSION_COOLDOWN_MS,
            RateAction::Notification => NOTIFICATION_COOLDOWN_MS,
            RateAction::Attention => ATTENTION_COOLDOWN_MS,
        }
    }
}

/// Whole seconds until the action becomes permitted again
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryAfter(pub u32);

/// Check whether an action may fire.
///
/// Pure in `now_ms` and the stored stamp. A missing or unparseable stamp
/// permits the action. On denial the remaining time is rounded up to whole
/// seconds for user-facing messaging.
pub fn try_fire(
    store: &dyn StateStore,
    action: RateAction,
    now_ms: f64,
) -> Result<(), RetryAfter> {
    let last = match last_fired_ms(store, action) {
        Some(ms) => ms,
        None => return Ok(()),
    };

    let elapsed = now_ms - last;
    if elapsed >= action.cooldown_ms() {
        return Ok(());
    }

    let remaining_ms = action.cooldown_ms() - elapsed;
    Err(RetryAfter((remaining_ms / 1000.0).ceil() as u32))
}

/// Record a successful firing of the action
pub fn record_fired(store: &dyn StateStore, action: RateAction, now_ms: f64) {
    store.set(action.storage_key(), &format!("{}", now_ms as u64));
}

fn last_fired_ms(store: &dyn StateStore, action: RateAction) -> Option<f64> {
    store
        .get(action.storage_key())
        .and_then(|raw| raw.trim().parse::<f64>().ok())
}
