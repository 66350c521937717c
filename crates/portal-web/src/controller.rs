//! wasm-bindgen controller wrapping the portal engine
//!
//! The page drives this controller from its event handlers and one
//! animation-frame loop. Methods that produce network work return a JSON
//! array of wire calls; the page executes each fetch and reports the
//! outcome to the matching `on_*` method.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use portal_core::{Effect, NotifyKind, PortalConfig, PortalEngine, Role, Severity};
use portal_net::{parse_change, HttpResponse, StoreClient};
use uuid::Uuid;

use crate::storage::{LocalStorageStore, SessionStorageStore};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Date, js_name = now)]
    fn date_now() -> f64;
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Portal controller for WASM - wraps PortalEngine with a JS-friendly API
#[wasm_bindgen]
pub struct PortalController {
    engine: PortalEngine,
    store: StoreClient,
}

#[wasm_bindgen]
impl PortalController {
    /// Create a controller from host-provided configuration values.
    ///
    /// Missing store credentials abort construction; a missing relay user
    /// id only logs a warning and disables notifications.
    #[wasm_bindgen(constructor)]
    pub fn new(
        store_url: Option<String>,
        store_key: Option<String>,
        passphrase: Option<String>,
        relay_user_id: Option<String>,
    ) -> Result<PortalController, JsValue> {
        // Set up panic hook for better error messages
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let config = PortalConfig::from_values(store_url, store_key, passphrase, relay_user_id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        if !config.has_relay_user() {
            web_sys::console::warn_1(&JsValue::from_str(
                "Relay user id is not configured; notifications are disabled",
            ));
        }

        let store = StoreClient::new(&config.store_url, &config.store_key);
        let engine = PortalEngine::new(
            config,
            Rc::new(SessionStorageStore::new()),
            Rc::new(LocalStorageStore::new()),
        );

        Ok(Self { engine, store })
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Restore a session persisted by this tab
    #[wasm_bindgen]
    pub fn restore_session(&mut self) -> bool {
        self.engine.restore_session(date_now())
    }

    /// Update the typed passphrase
    #[wasm_bindgen]
    pub fn set_password_input(&mut self, value: &str) {
        self.engine.set_password_input(value);
    }

    /// Attempt authentication; the failure detail lands in the snapshot
    #[wasm_bindgen]
    pub fn authenticate(&mut self) -> bool {
        self.engine.authenticate(date_now()).is_ok()
    }

    /// End the session and return to the locked screen
    #[wasm_bindgen]
    pub fn logout(&mut self) {
        self.engine.logout();
    }

    /// Report user activity for the idle supervisor
    #[wasm_bindgen]
    pub fn record_activity(&mut self) {
        self.engine.record_activity(date_now());
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Select a role by its wire name; unknown names are ignored
    #[wasm_bindgen]
    pub fn select_role(&mut self, role: &str) {
        if let Some(role) = Role::parse(role) {
            self.engine.select_role(role, date_now());
        }
    }

    /// Fade from the portal back to role selection
    #[wasm_bindgen]
    pub fn back_to_roles(&mut self) {
        self.engine.back_to_roles(date_now());
    }

    /// Flip between light and dark presentation
    #[wasm_bindgen]
    pub fn toggle_theme(&mut self) {
        self.engine.toggle_theme();
    }

    // =========================================================================
    // Form
    // =========================================================================

    #[wasm_bindgen]
    pub fn set_title(&mut self, value: &str) {
        self.engine.set_title(value);
    }

    #[wasm_bindgen]
    pub fn set_description(&mut self, value: &str) {
        self.engine.set_description(value);
    }

    /// Set severity by its wire name; unknown names are ignored
    #[wasm_bindgen]
    pub fn set_severity(&mut self, value: &str) {
        if let Some(severity) = Severity::parse(value) {
            self.engine.set_severity(severity);
        }
    }

    // =========================================================================
    // Store Calls
    // =========================================================================

    /// Kick off a full list load
    #[wasm_bindgen]
    pub fn refresh(&mut self) -> String {
        let effects = self.engine.refresh();
        self.wire_calls_json(&effects)
    }

    /// Validate and file the current form
    #[wasm_bindgen]
    pub fn submit(&mut self) -> String {
        let effects = self.engine.submit_grievance(date_now());
        self.wire_calls_json(&effects)
    }

    /// Mark a grievance resolved or reopen it
    #[wasm_bindgen]
    pub fn set_completed(&mut self, id: &str, completed: bool) -> String {
        match Uuid::parse_str(id) {
            Ok(id) => {
                let effects = self.engine.set_completed(id, completed);
                self.wire_calls_json(&effects)
            }
            Err(_) => "[]".to_string(),
        }
    }

    /// Arm deletion of one grievance
    #[wasm_bindgen]
    pub fn request_delete(&mut self, id: &str) {
        if let Ok(id) = Uuid::parse_str(id) {
            self.engine.request_delete(id);
        }
    }

    /// Issue the armed delete
    #[wasm_bindgen]
    pub fn confirm_delete(&mut self) -> String {
        let effects = self.engine.confirm_delete();
        self.wire_calls_json(&effects)
    }

    /// Disarm the pending delete
    #[wasm_bindgen]
    pub fn decline_delete(&mut self) {
        self.engine.decline_delete();
    }

    /// Ping the other party about the drafted grievance
    #[wasm_bindgen]
    pub fn request_notify(&mut self) -> String {
        let effects = self.engine.request_notify(date_now());
        self.wire_calls_json(&effects)
    }

    /// Demand immediate attention for the drafted grievance
    #[wasm_bindgen]
    pub fn request_attention(&mut self) -> String {
        let effects = self.engine.request_attention(date_now());
        self.wire_calls_json(&effects)
    }

    // =========================================================================
    // Call Completions
    // =========================================================================

    /// A list fetch finished
    #[wasm_bindgen]
    pub fn on_list_response(&mut self, generation: u64, status: u16, body: &str) {
        let response = HttpResponse::new(status, body);
        match StoreClient::parse_list(&response) {
            Ok(items) => self.engine.on_list_loaded(generation, items),
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "grievance list load failed: {}",
                    e
                )));
                self.engine.on_list_failed(generation, date_now());
            }
        }
    }

    /// The insert call finished; success hands back follow-up wire calls
    #[wasm_bindgen]
    pub fn on_insert_response(&mut self, status: u16) -> String {
        if is_success(status) {
            let effects = self.engine.on_submit_success(date_now());
            self.wire_calls_json(&effects)
        } else {
            self.engine.on_submit_failure(date_now());
            "[]".to_string()
        }
    }

    /// The completed-flag update finished
    #[wasm_bindgen]
    pub fn on_update_response(&mut self, status: u16) -> String {
        let effects = self.engine.on_update_result(is_success(status), date_now());
        self.wire_calls_json(&effects)
    }

    /// The delete call finished
    #[wasm_bindgen]
    pub fn on_delete_response(&mut self, status: u16) -> String {
        let effects = self.engine.on_delete_result(is_success(status), date_now());
        self.wire_calls_json(&effects)
    }

    /// A notification relay call finished.
    ///
    /// `automatic` echoes the flag from the wire call that was executed,
    /// so post-submission sends settle separately from manual pings.
    #[wasm_bindgen]
    pub fn on_notify_response(&mut self, kind: &str, automatic: bool, status: u16) {
        let kind = if kind == "attention" {
            NotifyKind::Attention
        } else {
            NotifyKind::Notify
        };
        self.engine
            .on_notify_result(kind, automatic, is_success(status), date_now());
    }

    /// Apply one live change-feed payload
    #[wasm_bindgen]
    pub fn apply_feed_event(&mut self, json: &str) {
        match parse_change(json) {
            Ok(event) => self.engine.apply_change(event),
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "unusable change-feed payload: {}",
                    e
                )));
            }
        }
    }

    // =========================================================================
    // Unified Frame Tick
    // =========================================================================

    /// Advance timers and return the complete render snapshot
    #[wasm_bindgen]
    pub fn tick_frame(&mut self) -> String {
        let now = date_now();
        self.engine.tick(now);
        serde_json::to_string(&self.snapshot_value(now)).unwrap_or_else(|_| "{}".to_string())
    }

    /// Check if anything on screen still needs per-frame ticks
    #[wasm_bindgen]
    pub fn is_animating(&self) -> bool {
        self.engine.is_animating(date_now())
    }

    // =========================================================================
    // JSON Building
    // =========================================================================

    fn wire_calls_json(&self, effects: &[Effect]) -> String {
        let calls: Vec<serde_json::Value> = effects
            .iter()
            .filter_map(|effect| self.wire_call(effect))
            .collect();
        serde_json::to_string(&calls).unwrap_or_else(|_| "[]".to_string())
    }

    fn wire_call(&self, effect: &Effect) -> Option<serde_json::Value> {
        let call = match effect {
            Effect::RefreshList { generation } => serde_json::json!({
                "kind": "list",
                "generation": generation,
                "request": self.store.list_grievances(),
            }),
            Effect::InsertGrievance { grievance } => serde_json::json!({
                "kind": "insert",
                "request": self.store.insert_grievance(grievance).ok()?,
            }),
            Effect::UpdateGrievance { id, completed } => serde_json::json!({
                "kind": "update",
                "request": self.store.set_completed(*id, *completed).ok()?,
            }),
            Effect::DeleteGrievance { id } => serde_json::json!({
                "kind": "delete",
                "request": self.store.delete_grievance(*id),
            }),
            Effect::SendNotification {
                kind,
                automatic,
                title,
                description,
            } => {
                let user = self.engine.config().relay_user_id.clone()?;
                serde_json::json!({
                    "kind": "notify",
                    "notifyKind": kind.as_str(),
                    "automatic": automatic,
                    "request": self
                        .store
                        .notify_request(&user, *kind, title, description)
                        .ok()?,
                })
            }
        };
        Some(call)
    }

    fn snapshot_value(&self, now: f64) -> serde_json::Value {
        let form = self.engine.form();
        let (outgoing, incoming) = self.engine.view_opacities(now);

        serde_json::json!({
            "view": self.engine.view(),
            "interactiveView": self.engine.interactive_view(),
            "fading": self.engine.is_fading(),
            "viewOpacities": { "outgoing": outgoing, "incoming": incoming },
            "authenticated": self.engine.is_authenticated(),
            "authError": self.engine.auth_error().map(|e| e.to_string()),
            "shaking": self.engine.is_shaking(now),
            "passwordInput": self.engine.password_input(),
            "theme": self.engine.theme(),
            "idle": {
                "phase": self.engine.idle_phase(now),
                "countdown": self.engine.idle_countdown(now),
            },
            "overlay": {
                "visible": self.engine.overlay().is_visible(now),
                "opacity": self.engine.overlay().opacity(now),
            },
            "notice": self.engine.notice().map(|n| n.message.as_str()),
            "form": {
                "title": &form.title,
                "description": &form.description,
                "severity": form.severity,
                "severityLabel": form.severity.label(),
            },
            "grievances": {
                "active": self.engine.active_grievances(),
                "completed": self.engine.completed_grievances(),
            },
            "loading": self.engine.is_loading(),
            "submitting": self.engine.is_submitting(),
            "sendingNotify": self.engine.is_sending_notify(),
            "sendingAttention": self.engine.is_sending_attention(),
            "pendingDelete": self.engine.pending_delete().map(|id| id.to_string()),
            "animating": self.engine.is_animating(now),
        })
    }
}
