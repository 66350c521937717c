//! Portal engine coordinating all session and UI state
//!
//! This module is split into focused submodules:
//! - `auth`: Password gate, session restore, logout
//! - `transitions`: View crossfade sequencing
//! - `grievances`: Form, list state, and store call effects
//! - `notify`: Manual chat-notification pings
//! - `effects`: Emitted effects and applied change events

mod auth;
mod effects;
mod grievances;
mod notify;
mod transitions;

use std::rc::Rc;

use crate::config::PortalConfig;
use crate::grievance::{Grievance, NewGrievance, Severity};
use crate::idle::{IdlePhase, IdleSupervisor};
use crate::store::StateStore;
use crate::transition::{ConfirmOverlay, ViewFade};
use crate::view::{Theme, View};
use uuid::Uuid;

pub use auth::{AuthError, SHAKE_DURATION_MS};
pub use effects::{ChangeEvent, Effect};

/// How long transient notices stay on screen
pub const NOTICE_TIMEOUT_MS: u32 = 5000;

/// Transient inline notice with its auto-dismiss deadline
#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    expires_at_ms: f64,
}

/// Grievance form fields as typed so far
#[derive(Clone, Debug, Default)]
pub struct FormState {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// Portal engine owning all session, view, and list state
///
/// This is the single entry point for portal events, managing:
/// - Authentication (password gate, tab-scoped login flag)
/// - Idle supervision (warned countdown, forced logout)
/// - View crossfades (role selection and portal layers)
/// - The submission confirmation overlay
/// - Grievance form, validation, cooldowns, and list state
///
/// Event methods mutate state and return [`Effect`] values for the host
/// boundary to execute; `on_*` methods feed completions back in. All
/// timing flows through explicit `now_ms` parameters.
pub struct PortalEngine {
    /// Startup configuration
    config: PortalConfig,
    /// Tab-scoped store holding only the login flag
    session_store: Rc<dyn StateStore>,
    /// Durable per-origin store holding only rate-limit stamps
    durable_store: Rc<dyn StateStore>,

    // View layer
    view: View,
    fade: Option<ViewFade>,
    overlay: ConfirmOverlay,
    theme: Theme,

    // Session
    authenticated: bool,
    idle: IdleSupervisor,
    password_input: String,
    auth_error: Option<AuthError>,
    shake_until_ms: Option<f64>,

    // Portal state
    form: FormState,
    grievances: Vec<Grievance>,
    loading: bool,
    list_generation: u64,
    notice: Option<Notice>,
    pending_submission: Option<NewGrievance>,
    pending_delete: Option<Uuid>,
    submitting: bool,
    sending_notify: bool,
    sending_attention: bool,
}

impl PortalEngine {
    /// Create an engine in the locked state
    pub fn new(
        config: PortalConfig,
        session_store: Rc<dyn StateStore>,
        durable_store: Rc<dyn StateStore>,
    ) -> Self {
        Self {
            config,
            session_store,
            durable_store,
            view: View::Locked,
            fade: None,
            overlay: ConfirmOverlay::hidden(),
            theme: Theme::default(),
            authenticated: false,
            idle: IdleSupervisor::stopped(),
            password_input: String::new(),
            auth_error: None,
            shake_until_ms: None,
            form: FormState::default(),
            grievances: Vec::new(),
            loading: false,
            list_generation: 0,
            notice: None,
            pending_submission: None,
            pending_delete: None,
            submitting: false,
            sending_notify: false,
            sending_attention: false,
        }
    }

    /// Advance timers and commit completed transitions.
    ///
    /// Forced logout runs first so a warning or fade can never outlive the
    /// session it belongs to.
    pub fn tick(&mut self, now_ms: f64) {
        if self.idle.tick(now_ms) {
            self.logout();
        }
        self.tick_fade(now_ms);
        self.overlay.tick(now_ms);
        if let Some(notice) = &self.notice {
            if now_ms >= notice.expires_at_ms {
                self.notice = None;
            }
        }
        if let Some(until) = self.shake_until_ms {
            if now_ms >= until {
                self.shake_until_ms = None;
            }
        }
    }

    /// Feed a user activity event into the idle supervisor.
    ///
    /// Any activity cancels an in-progress warning and restarts the clock.
    pub fn record_activity(&mut self, now_ms: f64) {
        self.idle.record_activity(now_ms);
    }

    /// True while anything on screen still needs per-frame ticks
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.fade.is_some()
            || self.overlay.is_visible(now_ms)
            || self.idle.is_warning(now_ms)
            || self.notice.is_some()
            || self.shake_until_ms.is_some()
    }

    /// Flip between light and dark presentation
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// The committed view (the outgoing one during a fade)
    pub fn view(&self) -> View {
        self.view
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Idle supervisor phase at `now_ms`
    pub fn idle_phase(&self, now_ms: f64) -> IdlePhase {
        self.idle.phase(now_ms)
    }

    /// Warning countdown formatted as `m:ss`
    pub fn idle_countdown(&self, now_ms: f64) -> String {
        self.idle.countdown_display(now_ms)
    }

    pub fn overlay(&self) -> &ConfirmOverlay {
        &self.overlay
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// True while the locked screen should play its refusal shake
    pub fn is_shaking(&self, now_ms: f64) -> bool {
        matches!(self.shake_until_ms, Some(until) if now_ms < until)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn set_notice(&mut self, message: &str, now_ms: f64) {
        self.notice = Some(Notice {
            message: message.to_string(),
            expires_at_ms: now_ms + NOTICE_TIMEOUT_MS as f64,
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::MemoryStore;

    pub(crate) fn test_config() -> PortalConfig {
        PortalConfig {
            store_url: "https://store.example.com".to_string(),
            store_key: "anon-key".to_string(),
            passphrase: Some("hunter2".to_string()),
            relay_user_id: Some("424242".to_string()),
        }
    }

    pub(crate) fn test_engine() -> PortalEngine {
        PortalEngine::new(
            test_config(),
            Rc::new(MemoryStore::new()),
            Rc::new(MemoryStore::new()),
        )
    }

    /// Authenticate and land on the role selection screen
    pub(crate) fn logged_in_engine(now_ms: f64) -> PortalEngine {
        let mut engine = test_engine();
        engine.set_password_input("hunter2");
        engine.authenticate(now_ms).unwrap();
        engine
    }

    #[test]
    fn test_engine_starts_locked() {
        let engine = test_engine();
        assert_eq!(engine.view(), View::Locked);
        assert!(!engine.is_authenticated());
        assert_eq!(engine.idle_phase(0.0), IdlePhase::Stopped);
    }

    #[test]
    fn test_notice_expires_on_tick() {
        let mut engine = test_engine();
        engine.set_notice("transient", 0.0);
        assert!(engine.notice().is_some());

        engine.tick(NOTICE_TIMEOUT_MS as f64 - 1.0);
        assert!(engine.notice().is_some());

        engine.tick(NOTICE_TIMEOUT_MS as f64);
        assert!(engine.notice().is_none());
    }

    #[test]
    fn test_toggle_theme() {
        let mut engine = test_engine();
        assert_eq!(engine.theme(), Theme::Light);
        engine.toggle_theme();
        assert_eq!(engine.theme(), Theme::Dark);
    }

    #[test]
    fn test_is_animating_tracks_layers() {
        let mut engine = logged_in_engine(0.0);
        assert!(!engine.is_animating(1_000.0));

        engine.select_role(crate::view::Role::Primary, 1_000.0);
        assert!(engine.is_animating(1_200.0));

        engine.tick(2_000.0);
        assert!(!engine.is_animating(2_000.0));
    }
}
