//! Browser boundary for the grievance portal
//!
//! Runs in the page's main thread and bridges the pure engine to the DOM
//! world: web storage behind the engine's store seam, wall-clock time, and
//! JSON snapshots and wire calls for the rendering layer.
//!
//! ## Module Structure
//!
//! - `storage` - Web storage implementations of the engine's store seam
//! - `controller` - wasm-bindgen controller wrapping the engine
//!
//! ## Architecture
//!
//! The controller is a pure boundary layer. Event methods forward into the
//! engine and hand back wire-call descriptions; the page executes the
//! fetches and reports each outcome to the matching completion method. No
//! request is ever issued from Rust.

mod controller;
mod storage;

pub use controller::PortalController;
pub use storage::{LocalStorageStore, SessionStorageStore};
