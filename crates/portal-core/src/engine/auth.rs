//! Password gate, session restore, and logout

use serde::Serialize;
use thiserror::Error;

use super::PortalEngine;
use crate::view::View;

/// How long the locked screen plays its refusal shake
pub const SHAKE_DURATION_MS: u32 = 500;

/// Session-store key holding the login flag
const AUTH_FLAG_KEY: &str = "authenticated";
const AUTH_FLAG_VALUE: &str = "true";

/// Authentication failures surfaced on the locked screen
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize)]
pub enum AuthError {
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Password not configured. Please set the access passphrase.")]
    NotConfigured,
}

impl PortalEngine {
    /// Restore a session persisted by this tab.
    ///
    /// Returns true when the login flag was present and the engine moved
    /// straight to role selection.
    pub fn restore_session(&mut self, now_ms: f64) -> bool {
        if self.session_store.get(AUTH_FLAG_KEY).as_deref() != Some(AUTH_FLAG_VALUE) {
            return false;
        }
        self.authenticated = true;
        self.view = View::RoleSelection;
        self.idle.start(now_ms);
        true
    }

    /// Update the typed passphrase. Typing clears a shown error.
    pub fn set_password_input(&mut self, value: &str) {
        self.password_input = value.to_string();
        self.auth_error = None;
    }

    pub fn password_input(&self) -> &str {
        &self.password_input
    }

    pub fn auth_error(&self) -> Option<AuthError> {
        self.auth_error
    }

    /// Attempt authentication with the typed passphrase.
    ///
    /// A wrong passphrase clears the field and starts the refusal shake.
    /// A missing deployment passphrase reports an error but keeps the
    /// field, since retyping cannot fix the deployment.
    pub fn authenticate(&mut self, now_ms: f64) -> Result<(), AuthError> {
        self.auth_error = None;

        let expected = match &self.config.passphrase {
            Some(p) => p,
            None => {
                self.auth_error = Some(AuthError::NotConfigured);
                return Err(AuthError::NotConfigured);
            }
        };

        if self.password_input != *expected {
            self.password_input.clear();
            self.auth_error = Some(AuthError::IncorrectPassword);
            self.shake_until_ms = Some(now_ms + SHAKE_DURATION_MS as f64);
            return Err(AuthError::IncorrectPassword);
        }

        self.password_input.clear();
        self.authenticated = true;
        self.session_store.set(AUTH_FLAG_KEY, AUTH_FLAG_VALUE);
        self.idle.start(now_ms);
        self.view = View::RoleSelection;
        self.fade = None;
        Ok(())
    }

    /// End the session and return to the locked screen.
    ///
    /// The unlock swaps instantly with no crossfade, and the form draft
    /// survives so a half-typed grievance is not lost.
    pub fn logout(&mut self) {
        self.session_store.remove(AUTH_FLAG_KEY);
        self.authenticated = false;
        self.idle.stop();
        self.view = View::Locked;
        self.fade = None;
        self.overlay.dismiss();
        self.notice = None;
        self.password_input.clear();
        self.auth_error = None;
        self.pending_delete = None;
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::super::tests::{test_config, test_engine};
    use super::*;
    use crate::config::PortalConfig;
    use crate::idle::IdlePhase;
    use crate::store::{MemoryStore, StateStore};

    #[test]
    fn test_correct_password_unlocks() {
        let mut engine = test_engine();
        engine.set_password_input("hunter2");

        assert!(engine.authenticate(0.0).is_ok());
        assert!(engine.is_authenticated());
        assert_eq!(engine.view(), View::RoleSelection);
        assert_eq!(engine.password_input(), "");
        assert_eq!(engine.idle_phase(0.0), IdlePhase::Active);
    }

    #[test]
    fn test_wrong_password_shakes_and_clears_field() {
        let mut engine = test_engine();
        engine.set_password_input("letmein");

        assert_eq!(engine.authenticate(0.0), Err(AuthError::IncorrectPassword));
        assert!(!engine.is_authenticated());
        assert_eq!(engine.view(), View::Locked);
        assert_eq!(engine.password_input(), "");
        assert!(engine.is_shaking(100.0));
        assert!(!engine.is_shaking(SHAKE_DURATION_MS as f64));
    }

    #[test]
    fn test_typing_clears_error() {
        let mut engine = test_engine();
        engine.set_password_input("letmein");
        let _ = engine.authenticate(0.0);
        assert!(engine.auth_error().is_some());

        engine.set_password_input("h");
        assert!(engine.auth_error().is_none());
    }

    #[test]
    fn test_missing_passphrase_keeps_field() {
        let config = PortalConfig {
            passphrase: None,
            ..test_config()
        };
        let mut engine = super::super::PortalEngine::new(
            config,
            Rc::new(MemoryStore::new()),
            Rc::new(MemoryStore::new()),
        );
        engine.set_password_input("anything");

        assert_eq!(engine.authenticate(0.0), Err(AuthError::NotConfigured));
        assert_eq!(engine.password_input(), "anything");
        assert!(!engine.is_shaking(100.0));
    }

    #[test]
    fn test_session_flag_round_trip() {
        let session: Rc<MemoryStore> = Rc::new(MemoryStore::new());
        let durable: Rc<MemoryStore> = Rc::new(MemoryStore::new());

        let mut first = super::super::PortalEngine::new(
            test_config(),
            session.clone(),
            durable.clone(),
        );
        first.set_password_input("hunter2");
        first.authenticate(0.0).unwrap();
        assert_eq!(session.get("authenticated").as_deref(), Some("true"));

        // A reload in the same tab sees the flag and skips the gate.
        let mut second = super::super::PortalEngine::new(test_config(), session, durable);
        assert!(second.restore_session(1_000.0));
        assert_eq!(second.view(), View::RoleSelection);
    }

    #[test]
    fn test_restore_without_flag_stays_locked() {
        let mut engine = test_engine();
        assert!(!engine.restore_session(0.0));
        assert_eq!(engine.view(), View::Locked);
        assert!(!engine.is_authenticated());
    }

    #[test]
    fn test_logout_clears_session_but_keeps_draft() {
        let session: Rc<MemoryStore> = Rc::new(MemoryStore::new());
        let mut engine = super::super::PortalEngine::new(
            test_config(),
            session.clone(),
            Rc::new(MemoryStore::new()),
        );
        engine.set_password_input("hunter2");
        engine.authenticate(0.0).unwrap();
        engine.set_title("Left dishes");

        engine.logout();
        assert!(!engine.is_authenticated());
        assert_eq!(engine.view(), View::Locked);
        assert_eq!(session.get("authenticated"), None);
        assert_eq!(engine.idle_phase(0.0), IdlePhase::Stopped);
        assert_eq!(engine.form().title, "Left dishes");
    }
}
