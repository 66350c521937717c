//! Session and UI-transition core for the grievance portal
//!
//! This crate provides the client-side state machine behind the portal:
//! - Password-gated session authentication with a tab-scoped login flag
//! - Inactivity supervision (warned countdown, then forced logout)
//! - Crossfade sequencing between full-screen views
//! - A self-dismissing submission confirmation overlay
//! - Persistent cooldown gating for outbound actions
//! - Grievance validation, sanitization, and list state
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`config`]: Startup configuration and its hard/soft failure modes
//! - [`grievance`]: Domain records and severity levels
//! - [`store`]: Key-value storage seam backed by the host environment
//! - [`rate`]: Cooldown gate persisted across reloads
//! - [`validate`] / [`sanitize`]: Form field checks and markup stripping
//! - [`idle`]: Deadline-based inactivity supervisor
//! - [`transition`]: View crossfade and overlay sequencers
//! - [`view`]: Full-screen view, role, and theme enums
//!
//! The [`PortalEngine`] coordinates all of the above. Event methods mutate
//! state and return [`Effect`] values describing the network calls the host
//! boundary must execute; completion methods feed the results back in.
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without browser
//! 2. **Time Abstraction**: Timers and animations take explicit `now_ms` for deterministic testing
//! 3. **Single Writer**: One engine value owns all session state; no ambient singletons
//! 4. **Minimal Dependencies**: Core types have no browser or network dependencies

pub mod config;
pub mod grievance;
pub mod idle;
pub mod rate;
pub mod sanitize;
pub mod store;
pub mod transition;
pub mod validate;
pub mod view;

mod engine;

// Re-export core types for convenience
pub use config::{ConfigError, PortalConfig};
pub use engine::{
    AuthError, ChangeEvent, Effect, FormState, Notice, PortalEngine, NOTICE_TIMEOUT_MS,
    SHAKE_DURATION_MS,
};
pub use grievance::{Grievance, NewGrievance, NotifyKind, Severity};
pub use idle::{IdlePhase, IdleSupervisor};
pub use rate::{RateAction, RetryAfter};
pub use store::{MemoryStore, StateStore};
pub use transition::{ConfirmOverlay, OverlayPhase, ViewFade};
pub use validate::ValidationError;
pub use view::{Role, Theme, View};

/// Duration of view crossfades in milliseconds
pub use transition::FADE_DURATION_MS;

/// Hold time of the submission confirmation overlay in milliseconds
pub use transition::OVERLAY_HOLD_MS;

/// Inactivity timeout before forced logout in milliseconds
pub use idle::INACTIVITY_TIMEOUT_MS;

/// Warning window before the timeout fires in milliseconds
pub use idle::WARNING_WINDOW_MS;
