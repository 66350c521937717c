//! View transition and overlay sequencing
//!
//! Two independent single-flight layers: the full-screen view crossfade
//! and the submission confirmation overlay. Both are pure values driven by
//! explicit `now_ms` timestamps.

mod crossfade;
mod easing;
mod overlay;

pub use crossfade::ViewFade;
pub use easing::{ease_in_out, ease_out_cubic};
pub use overlay::{ConfirmOverlay, OverlayPhase};

/// Duration of a full-screen view crossfade in milliseconds
pub const FADE_DURATION_MS: u32 = 700;

/// How long the confirmation overlay holds before fading out
pub const OVERLAY_HOLD_MS: u32 = 2200;
