//! View crossfade sequencing
//!
//! Role selection and the portal swap through a timed crossfade. Only one
//! fade runs at a time; requests arriving mid-fade are dropped rather than
//! queued, and the committed view flips exactly once when the fade ends.

use super::PortalEngine;
use crate::transition::ViewFade;
use crate::view::{Role, View};

impl PortalEngine {
    /// Begin fading from role selection into a role's portal
    pub fn select_role(&mut self, role: Role, now_ms: f64) {
        if self.fade.is_some() {
            return;
        }
        if !self.authenticated || self.view != View::RoleSelection {
            return;
        }
        self.fade = Some(ViewFade::new(
            now_ms,
            View::RoleSelection,
            View::Portal { role },
        ));
    }

    /// Begin fading from the portal back to role selection
    pub fn back_to_roles(&mut self, now_ms: f64) {
        if self.fade.is_some() {
            return;
        }
        let role = match self.view {
            View::Portal { role } => role,
            _ => return,
        };
        self.fade = Some(ViewFade::new(
            now_ms,
            View::Portal { role },
            View::RoleSelection,
        ));
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn fade(&self) -> Option<&ViewFade> {
        self.fade.as_ref()
    }

    /// The view receiving input right now.
    ///
    /// During a fade the incoming view is interactive from the first frame,
    /// so a user can act on it before the fade commits.
    pub fn interactive_view(&self) -> View {
        match &self.fade {
            Some(fade) => fade.to,
            None => self.view,
        }
    }

    /// Opacities for the (outgoing, incoming) view layers
    pub fn view_opacities(&self, now_ms: f64) -> (f32, f32) {
        match &self.fade {
            Some(fade) => fade.opacities(now_ms),
            None => (1.0, 0.0),
        }
    }

    /// Commit the fade once its duration has elapsed.
    ///
    /// Returns true when a commit happened on this call.
    pub(crate) fn tick_fade(&mut self, now_ms: f64) -> bool {
        match &self.fade {
            Some(fade) if fade.is_complete(now_ms) => {
                self.apply_fade_completion();
                true
            }
            _ => false,
        }
    }

    fn apply_fade_completion(&mut self) {
        if let Some(fade) = self.fade.take() {
            self.view = fade.to;
        }
    }
}
