#![cfg(target_arch = "wasm32")]

//! Controller boundary tests
//!
//! These run under the wasm test runner. Outside a browser window the
//! storage stores degrade to no-ops, so the suite exercises construction,
//! render snapshots, and the wire-call JSON without touching real web
//! storage.

use wasm_bindgen_test::wasm_bindgen_test;

use portal_web::PortalController;

fn controller() -> PortalController {
    PortalController::new(
        Some("https://store.example.com".to_string()),
        Some("anon-key".to_string()),
        Some("hunter2".to_string()),
        Some("424242".to_string()),
    )
    .unwrap()
}

#[wasm_bindgen_test]
fn missing_store_credentials_abort_construction() {
    let result = PortalController::new(None, Some("anon-key".to_string()), None, None);
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn snapshot_starts_locked() {
    let mut controller = controller();
    let snapshot: serde_json::Value = serde_json::from_str(&controller.tick_frame()).unwrap();

    assert_eq!(snapshot["view"]["view"], "locked");
    assert_eq!(snapshot["authenticated"], false);
    assert_eq!(snapshot["theme"], "light");
    assert_eq!(snapshot["idle"]["phase"], "stopped");
    assert_eq!(snapshot["overlay"]["visible"], false);
}

#[wasm_bindgen_test]
fn wrong_password_lands_in_snapshot() {
    let mut controller = controller();
    controller.set_password_input("letmein");
    assert!(!controller.authenticate());

    let snapshot: serde_json::Value = serde_json::from_str(&controller.tick_frame()).unwrap();
    assert_eq!(snapshot["authError"], "Incorrect password");
    assert_eq!(snapshot["passwordInput"], "");
}

#[wasm_bindgen_test]
fn refresh_produces_list_wire_call() {
    let mut controller = controller();
    controller.set_password_input("hunter2");
    assert!(controller.authenticate());

    let calls: serde_json::Value = serde_json::from_str(&controller.refresh()).unwrap();
    assert_eq!(calls[0]["kind"], "list");
    assert_eq!(calls[0]["generation"], 1);
    assert_eq!(calls[0]["request"]["method"], "GET");
    assert_eq!(
        calls[0]["request"]["url"],
        "https://store.example.com/rest/v1/grievances?select=*&order=created_at.desc"
    );
}

#[wasm_bindgen_test]
fn submit_then_completion_produces_insert_and_notify() {
    let mut controller = controller();
    controller.set_password_input("hunter2");
    assert!(controller.authenticate());

    controller.set_title("Left dishes");
    controller.set_description("in the sink again");
    let calls: serde_json::Value = serde_json::from_str(&controller.submit()).unwrap();
    assert_eq!(calls[0]["kind"], "insert");
    assert_eq!(calls[0]["request"]["method"], "POST");

    // The store accepting hands back a refresh plus the automatic
    // notification, flagged so its completion settles separately.
    let follow_ups: serde_json::Value =
        serde_json::from_str(&controller.on_insert_response(201)).unwrap();
    assert_eq!(follow_ups[0]["kind"], "list");
    assert_eq!(follow_ups[1]["kind"], "notify");
    assert_eq!(follow_ups[1]["notifyKind"], "notify");
    assert_eq!(follow_ups[1]["automatic"], true);
    assert_eq!(
        follow_ups[1]["request"]["url"],
        "https://store.example.com/functions/v1/notify-relay"
    );
}

#[wasm_bindgen_test]
fn rejected_submission_yields_no_wire_calls() {
    let mut controller = controller();
    controller.set_password_input("hunter2");
    assert!(controller.authenticate());

    let calls: serde_json::Value = serde_json::from_str(&controller.submit()).unwrap();
    assert_eq!(calls.as_array().map(|a| a.len()), Some(0));

    let snapshot: serde_json::Value = serde_json::from_str(&controller.tick_frame()).unwrap();
    assert_eq!(snapshot["notice"], "Title is required. Description is required");
}
