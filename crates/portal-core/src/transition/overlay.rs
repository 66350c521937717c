//! Submission confirmation overlay
//!
//! Independent of the view crossfade layer: the overlay may run while a
//! view fade is in flight. It holds fully visible for a fixed window, then
//! fades out on its own and clears.

use super::{ease_out_cubic, FADE_DURATION_MS, OVERLAY_HOLD_MS};

/// Phase of the confirmation overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayPhase {
    Hidden,
    /// Fully visible during the hold window
    Holding,
    /// Fading out over the fade duration
    Fading,
}

/// Self-dismissing confirmation overlay
#[derive(Clone, Debug, Default)]
pub struct ConfirmOverlay {
    shown_at_ms: Option<f64>,
}

impl ConfirmOverlay {
    /// Create a hidden overlay
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Show the overlay, restarting the hold window if already visible
    pub fn show(&mut self, now_ms: f64) {
        self.shown_at_ms = Some(now_ms);
    }

    /// Hide immediately (logout teardown)
    pub fn dismiss(&mut self) {
        self.shown_at_ms = None;
    }

    /// Current phase at `now_ms`
    pub fn phase(&self, now_ms: f64) -> OverlayPhase {
        let shown_at = match self.shown_at_ms {
            Some(at) => at,
            None => return OverlayPhase::Hidden,
        };
        let elapsed = now_ms - shown_at;
        if elapsed < OVERLAY_HOLD_MS as f64 {
            OverlayPhase::Holding
        } else if elapsed < (OVERLAY_HOLD_MS + FADE_DURATION_MS) as f64 {
            OverlayPhase::Fading
        } else {
            OverlayPhase::Hidden
        }
    }

    /// True while the overlay renders at any opacity
    pub fn is_visible(&self, now_ms: f64) -> bool {
        self.phase(now_ms) != OverlayPhase::Hidden
    }

    /// Overlay opacity at `now_ms`
    pub fn opacity(&self, now_ms: f64) -> f32 {
        let shown_at = match self.shown_at_ms {
            Some(at) => at,
            None => return 0.0,
        };
        match self.phase(now_ms) {
            OverlayPhase::Hidden => 0.0,
            OverlayPhase::Holding => 1.0,
            OverlayPhase::Fading => {
                let into_fade = (now_ms - shown_at - OVERLAY_HOLD_MS as f64) as f32;
                let t = (into_fade / FADE_DURATION_MS as f32).clamp(0.0, 1.0);
                1.0 - ease_out_cubic(t)
            }
        }
    }

    /// Clear the overlay once its fade has finished; returns true when it
    /// was cleared by this call.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.shown_at_ms {
            Some(at) if now_ms - at >= (OVERLAY_HOLD_MS + FADE_DURATION_MS) as f64 => {
                self.shown_at_ms = None;
                true
            }
            _ => false,
        }
    }
}
