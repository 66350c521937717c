//! Crossfade between full-screen views

use super::{ease_in_out, FADE_DURATION_MS};
use crate::view::View;

/// An in-flight crossfade between two full-screen views.
///
/// Both views render while the fade runs; only the incoming one is
/// interactive. Committing the target view happens in the engine tick,
/// exactly once, when the fade completes.
#[derive(Clone, Debug)]
pub struct ViewFade {
    /// Start time (ms timestamp)
    pub start_ms: f64,
    /// View fading out
    pub from: View,
    /// View fading in
    pub to: View,
}

impl ViewFade {
    /// Start a crossfade at `start_ms`
    pub fn new(start_ms: f64, from: View, to: View) -> Self {
        Self { start_ms, from, to }
    }

    /// Get the progress (0.0 to 1.0)
    pub fn progress(&self, now_ms: f64) -> f32 {
        let elapsed = (now_ms - self.start_ms) as f32;
        (elapsed / FADE_DURATION_MS as f32).clamp(0.0, 1.0)
    }

    /// Check if the fade is complete
    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Get the eased progress
    pub fn eased_progress(&self, now_ms: f64) -> f32 {
        ease_in_out(self.progress(now_ms))
    }

    /// Get layer opacities (outgoing, incoming)
    pub fn opacities(&self, now_ms: f64) -> (f32, f32) {
        let t = self.eased_progress(now_ms);
        (1.0 - t, t)
    }
}
