//! Deadline-based inactivity supervisor
//!
//! One logout deadline drives everything: the warning threshold and the
//! countdown are derived from it, so a reset atomically replaces the whole
//! schedule. The logout check always precedes the warning check, so a
//! warning can never fire after logout already occurred.

use serde::Serialize;

/// Inactivity timeout before forced logout (15 minutes)
pub const INACTIVITY_TIMEOUT_MS: u32 = 15 * 60 * 1000;

/// Warning window before the timeout fires (2 minutes)
pub const WARNING_WINDOW_MS: u32 = 2 * 60 * 1000;

/// Phase of the inactivity supervisor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IdlePhase {
    /// Not running (no authenticated session)
    Stopped,
    /// Session active, no warning yet
    Active,
    /// Countdown showing; any activity cancels it
    Warning,
    /// The logout deadline fired
    LoggedOut,
}

/// Inactivity supervisor owning the logout schedule
#[derive(Clone, Debug)]
pub struct IdleSupervisor {
    /// Absolute deadline for forced logout; `None` while stopped
    logout_at_ms: Option<f64>,
    /// Latched once the deadline fires
    logged_out: bool,
}

impl Default for IdleSupervisor {
    fn default() -> Self {
        Self::stopped()
    }
}

impl IdleSupervisor {
    /// Create a supervisor that is not running
    pub fn stopped() -> Self {
        Self {
            logout_at_ms: None,
            logged_out: false,
        }
    }

    /// Arm the schedule for a fresh session
    pub fn start(&mut self, now_ms: f64) {
        self.logout_at_ms = Some(now_ms + INACTIVITY_TIMEOUT_MS as f64);
        self.logged_out = false;
    }

    /// Disarm everything (manual logout or session teardown)
    pub fn stop(&mut self) {
        self.logout_at_ms = None;
        self.logged_out = false;
    }

    /// Reset the schedule on user activity.
    ///
    /// Cancels an in-progress warning and restarts the full clock. Ignored
    /// while stopped or after the deadline fired.
    pub fn record_activity(&mut self, now_ms: f64) {
        if self.logged_out || self.logout_at_ms.is_none() {
            return;
        }
        self.logout_at_ms = Some(now_ms + INACTIVITY_TIMEOUT_MS as f64);
    }

    /// Current phase at `now_ms`
    pub fn phase(&self, now_ms: f64) -> IdlePhase {
        if self.logged_out {
            return IdlePhase::LoggedOut;
        }
        let logout_at = match self.logout_at_ms {
            Some(at) => at,
            None => return IdlePhase::Stopped,
        };
        if now_ms >= logout_at {
            IdlePhase::LoggedOut
        } else if now_ms >= logout_at - WARNING_WINDOW_MS as f64 {
            IdlePhase::Warning
        } else {
            IdlePhase::Active
        }
    }

    /// True while the warning countdown should show
    pub fn is_warning(&self, now_ms: f64) -> bool {
        self.phase(now_ms) == IdlePhase::Warning
    }

    /// Whole seconds until forced logout, rounded up, zero once passed
    pub fn seconds_remaining(&self, now_ms: f64) -> u32 {
        let logout_at = match self.logout_at_ms {
            Some(at) if !self.logged_out => at,
            _ => return 0,
        };
        let remaining_ms = logout_at - now_ms;
        if remaining_ms <= 0.0 {
            0
        } else {
            (remaining_ms / 1000.0).ceil() as u32
        }
    }

    /// Warning countdown formatted as `m:ss` with zero-padded seconds
    pub fn countdown_display(&self, now_ms: f64) -> String {
        let seconds = self.seconds_remaining(now_ms);
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }

    /// Advance the supervisor; returns true exactly once when the logout
    /// deadline fires.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.logged_out {
            return false;
        }
        match self.logout_at_ms {
            Some(at) if now_ms >= at => {
                self.logged_out = true;
                self.logout_at_ms = None;
                true
            }
            _ => false,
        }
    }
}
