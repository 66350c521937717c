//! Grievance form, list state, and store call effects
//!
//! The submission pipeline runs validation, the cooldown check, and markup
//! sanitisation in that order, and only a fully clean form produces an
//! insert effect. List loads are tagged with a generation counter so a
//! slow response can never clobber a newer one.

use uuid::Uuid;

use super::effects::{ChangeEvent, Effect};
use super::{FormState, PortalEngine};
use crate::grievance::{Grievance, NewGrievance, NotifyKind, Severity};
use crate::rate::{self, RateAction, RetryAfter};
use crate::sanitize::sanitize_text;
use crate::validate::{join_messages, validate_grievance};

impl PortalEngine {
    pub fn set_title(&mut self, value: &str) {
        self.form.title = value.to_string();
    }

    pub fn set_description(&mut self, value: &str) {
        self.form.description = value.to_string();
    }

    pub fn set_severity(&mut self, severity: Severity) {
        self.form.severity = severity;
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn grievances(&self) -> &[Grievance] {
        &self.grievances
    }

    /// Grievances still open, in stored order
    pub fn active_grievances(&self) -> Vec<&Grievance> {
        self.grievances.iter().filter(|g| g.is_active()).collect()
    }

    pub fn completed_grievances(&self) -> Vec<&Grievance> {
        self.grievances.iter().filter(|g| !g.is_active()).collect()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Kick off a full list load
    pub fn refresh(&mut self) -> Vec<Effect> {
        self.loading = true;
        self.list_generation += 1;
        vec![Effect::RefreshList {
            generation: self.list_generation,
        }]
    }

    /// A list load finished. Stale generations are dropped.
    pub fn on_list_loaded(&mut self, generation: u64, items: Vec<Grievance>) {
        if generation != self.list_generation {
            return;
        }
        self.loading = false;
        self.grievances = items;
    }

    pub fn on_list_failed(&mut self, generation: u64, now_ms: f64) {
        if generation != self.list_generation {
            return;
        }
        self.loading = false;
        self.set_notice("Failed to load grievances. Please try again.", now_ms);
    }

    /// Validate, rate-check, sanitise, and file the current form.
    ///
    /// Returns the insert effect on success and an empty vector when the
    /// submission was refused; the refusal reason lands in the notice.
    pub fn submit_grievance(&mut self, now_ms: f64) -> Vec<Effect> {
        if self.submitting || !self.authenticated {
            return Vec::new();
        }

        let errors = validate_grievance(&self.form.title, &self.form.description);
        if !errors.is_empty() {
            let message = join_messages(&errors);
            self.set_notice(&message, now_ms);
            return Vec::new();
        }

        if let Err(RetryAfter(seconds)) =
            rate::try_fire(self.durable_store.as_ref(), RateAction::Submission, now_ms)
        {
            let message = format!(
                "Please wait {} seconds before submitting another grievance.",
                seconds
            );
            self.set_notice(&message, now_ms);
            return Vec::new();
        }

        let grievance = NewGrievance::under_review(
            sanitize_text(self.form.title.trim()),
            sanitize_text(self.form.description.trim()),
            self.form.severity,
        );
        self.pending_submission = Some(grievance.clone());
        self.submitting = true;
        vec![Effect::InsertGrievance { grievance }]
    }

    /// The store accepted the insert.
    ///
    /// Starts the cooldown, clears the form, shows the confirmation
    /// overlay, and refreshes the list. When a relay user is configured a
    /// notification for the accepted grievance rides along.
    pub fn on_submit_success(&mut self, now_ms: f64) -> Vec<Effect> {
        let pending = match self.pending_submission.take() {
            Some(p) => p,
            None => return Vec::new(),
        };
        self.submitting = false;
        // The insert landed, so the cooldown stamp is written even if the
        // session ended while the call was in flight.
        rate::record_fired(self.durable_store.as_ref(), RateAction::Submission, now_ms);

        if !self.authenticated {
            return Vec::new();
        }

        self.form = FormState::default();
        self.notice = None;
        self.overlay.show(now_ms);

        let mut effects = self.refresh();
        if self.config.has_relay_user() {
            effects.push(Effect::SendNotification {
                kind: NotifyKind::Notify,
                automatic: true,
                title: pending.title,
                description: pending.description,
            });
        }
        effects
    }

    pub fn on_submit_failure(&mut self, now_ms: f64) {
        self.submitting = false;
        self.pending_submission = None;
        if self.authenticated {
            self.set_notice("Failed to submit grievance. Please try again.", now_ms);
        }
    }

    /// Arm deletion of one grievance. The remote call waits for an
    /// explicit confirmation.
    pub fn request_delete(&mut self, id: Uuid) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    /// Issue the armed delete
    pub fn confirm_delete(&mut self) -> Vec<Effect> {
        match self.pending_delete.take() {
            Some(id) => vec![Effect::DeleteGrievance { id }],
            None => Vec::new(),
        }
    }

    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn on_delete_result(&mut self, ok: bool, now_ms: f64) -> Vec<Effect> {
        if ok {
            self.refresh()
        } else {
            self.set_notice("Failed to delete grievance. Please try again.", now_ms);
            Vec::new()
        }
    }

    /// Mark a grievance resolved, or reopen it
    pub fn set_completed(&mut self, id: Uuid, completed: bool) -> Vec<Effect> {
        vec![Effect::UpdateGrievance { id, completed }]
    }

    pub fn on_update_result(&mut self, ok: bool, now_ms: f64) -> Vec<Effect> {
        if ok {
            self.refresh()
        } else {
            self.set_notice("Failed to update grievance. Please try again.", now_ms);
            Vec::new()
        }
    }

    /// Apply a store change-feed event to the local list.
    ///
    /// Inserts of rows already known (the submitter's own refresh usually
    /// wins the race) are ignored, so the list never shows duplicates.
    pub fn apply_change(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::Inserted(grievance) => {
                if !self.grievances.iter().any(|g| g.id == grievance.id) {
                    self.grievances.insert(0, grievance);
                }
            }
            ChangeEvent::Updated(grievance) => {
                if let Some(slot) = self.grievances.iter_mut().find(|g| g.id == grievance.id) {
                    *slot = grievance;
                }
            }
            ChangeEvent::Deleted(id) => {
                self.grievances.retain(|g| g.id != id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::logged_in_engine;
    use super::*;
    use crate::grievance::STATUS_UNDER_REVIEW;
    use crate::rate::SUBMISSION_COOLDOWN_MS;

    fn sample(id: Uuid, title: &str, completed: bool) -> Grievance {
        Grievance {
            id,
            title: title.to_string(),
            description: String::new(),
            severity: Severity::Minor,
            status: STATUS_UNDER_REVIEW.to_string(),
            completed,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_submit_produces_insert_effect() {
        let mut engine = logged_in_engine(0.0);
        engine.set_title("  Left dishes  ");
        engine.set_description("in the sink again");
        engine.set_severity(Severity::Minor);

        let effects = engine.submit_grievance(1_000.0);
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::InsertGrievance { grievance } => {
                assert_eq!(grievance.title, "Left dishes");
                assert_eq!(grievance.description, "in the sink again");
                assert_eq!(grievance.status, STATUS_UNDER_REVIEW);
            }
            other => panic!("unexpected effect: {:?}", other),
        }
        assert!(engine.is_submitting());
    }

    #[test]
    fn test_submit_rejects_empty_title() {
        let mut engine = logged_in_engine(0.0);
        engine.set_title("   ");
        engine.set_description("something");

        let effects = engine.submit_grievance(1_000.0);
        assert!(effects.is_empty());
        assert_eq!(
            engine.notice().map(|n| n.message.as_str()),
            Some("Title is required")
        );
        assert!(!engine.is_submitting());
    }

    #[test]
    fn test_submit_joins_multiple_violations() {
        let mut engine = logged_in_engine(0.0);

        let effects = engine.submit_grievance(1_000.0);
        assert!(effects.is_empty());
        assert_eq!(
            engine.notice().map(|n| n.message.as_str()),
            Some("Title is required. Description is required")
        );
    }

    #[test]
    fn test_submit_strips_markup() {
        let mut engine = logged_in_engine(0.0);
        engine.set_title("<script>alert(1)</script>Dishes");
        engine.set_description("<b onclick=\"x()\">again</b>");

        let effects = engine.submit_grievance(1_000.0);
        match &effects[0] {
            Effect::InsertGrievance { grievance } => {
                assert_eq!(grievance.title, "alert(1)Dishes");
                assert_eq!(grievance.description, "<b>again</b>");
            }
            other => panic!("unexpected effect: {:?}", other),
        }
    }

    #[test]
    fn test_success_starts_cooldown_and_clears_form() {
        let mut engine = logged_in_engine(0.0);
        engine.set_title("Dishes");
        engine.set_description("again");
        engine.set_severity(Severity::Critical);

        engine.submit_grievance(1_000.0);
        let effects = engine.on_submit_success(1_500.0);

        assert!(!engine.is_submitting());
        assert_eq!(engine.form().title, "");
        assert_eq!(engine.form().severity, Severity::Minor);
        assert!(engine.overlay().is_visible(1_600.0));

        // Refresh plus the automatic notification.
        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[0], Effect::RefreshList { generation: 1 }));
        match &effects[1] {
            Effect::SendNotification {
                kind,
                automatic,
                title,
                description,
            } => {
                assert_eq!(*kind, NotifyKind::Notify);
                assert!(*automatic);
                assert_eq!(title, "Dishes");
                assert_eq!(description, "again");
            }
            other => panic!("unexpected effect: {:?}", other),
        }

        // Second submission inside the cooldown window is refused. Ten
        // seconds after the stamp, twenty remain.
        engine.set_title("Dishes");
        engine.set_description("again");
        let refused = engine.submit_grievance(11_500.0);
        assert!(refused.is_empty());
        assert_eq!(
            engine.notice().map(|n| n.message.as_str()),
            Some("Please wait 20 seconds before submitting another grievance.")
        );

        // And permitted once the window has passed.
        let allowed = engine.submit_grievance(1_500.0 + SUBMISSION_COOLDOWN_MS);
        assert_eq!(allowed.len(), 1);
    }

    #[test]
    fn test_failure_reports_notice_without_cooldown() {
        let mut engine = logged_in_engine(0.0);
        engine.set_title("Dishes");
        engine.set_description("again");

        engine.submit_grievance(1_000.0);
        engine.on_submit_failure(1_500.0);

        assert_eq!(
            engine.notice().map(|n| n.message.as_str()),
            Some("Failed to submit grievance. Please try again.")
        );
        // Form survives for a retry, and no cooldown was recorded.
        assert_eq!(engine.form().title, "Dishes");
        let retry = engine.submit_grievance(2_000.0);
        assert_eq!(retry.len(), 1);
    }

    #[test]
    fn test_duplicate_submit_while_in_flight_is_dropped() {
        let mut engine = logged_in_engine(0.0);
        engine.set_title("Dishes");
        engine.set_description("again");

        assert_eq!(engine.submit_grievance(1_000.0).len(), 1);
        assert!(engine.submit_grievance(1_001.0).is_empty());
    }

    #[test]
    fn test_no_notification_without_relay_user() {
        let mut engine = logged_in_engine(0.0);
        engine.config.relay_user_id = None;
        engine.set_title("Dishes");
        engine.set_description("again");

        engine.submit_grievance(1_000.0);
        let effects = engine.on_submit_success(1_500.0);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::RefreshList { .. }));
    }

    #[test]
    fn test_stale_list_response_is_dropped() {
        let mut engine = logged_in_engine(0.0);
        let first = engine.refresh();
        let second = engine.refresh();
        assert!(matches!(first[0], Effect::RefreshList { generation: 1 }));
        assert!(matches!(second[0], Effect::RefreshList { generation: 2 }));

        let id = Uuid::new_v4();
        engine.on_list_loaded(2, vec![sample(id, "fresh", false)]);
        assert_eq!(engine.grievances().len(), 1);

        // The older response arrives late and must not clobber the list.
        engine.on_list_loaded(1, Vec::new());
        assert_eq!(engine.grievances().len(), 1);
        assert!(!engine.is_loading());
    }

    #[test]
    fn test_list_failure_sets_notice() {
        let mut engine = logged_in_engine(0.0);
        engine.refresh();
        engine.on_list_failed(1, 2_000.0);
        assert!(!engine.is_loading());
        assert_eq!(
            engine.notice().map(|n| n.message.as_str()),
            Some("Failed to load grievances. Please try again.")
        );
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut engine = logged_in_engine(0.0);
        let id = Uuid::new_v4();

        engine.request_delete(id);
        assert_eq!(engine.pending_delete(), Some(id));

        engine.decline_delete();
        assert!(engine.confirm_delete().is_empty());

        engine.request_delete(id);
        let effects = engine.confirm_delete();
        assert_eq!(effects, vec![Effect::DeleteGrievance { id }]);
        assert_eq!(engine.pending_delete(), None);
    }

    #[test]
    fn test_update_failure_sets_notice() {
        let mut engine = logged_in_engine(0.0);
        let effects = engine.on_update_result(false, 3_000.0);
        assert!(effects.is_empty());
        assert_eq!(
            engine.notice().map(|n| n.message.as_str()),
            Some("Failed to update grievance. Please try again.")
        );
    }

    #[test]
    fn test_active_completed_split() {
        let mut engine = logged_in_engine(0.0);
        let open = Uuid::new_v4();
        let done = Uuid::new_v4();
        let mut closed_by_status = sample(Uuid::new_v4(), "closed", false);
        closed_by_status.status = crate::grievance::STATUS_COMPLETED.to_string();

        engine.refresh();
        engine.on_list_loaded(
            1,
            vec![
                sample(open, "open", false),
                sample(done, "done", true),
                closed_by_status,
            ],
        );

        assert_eq!(engine.active_grievances().len(), 1);
        assert_eq!(engine.completed_grievances().len(), 2);
    }

    #[test]
    fn test_change_feed_insert_update_delete() {
        let mut engine = logged_in_engine(0.0);
        let id = Uuid::new_v4();

        engine.apply_change(ChangeEvent::Inserted(sample(id, "new", false)));
        assert_eq!(engine.grievances().len(), 1);

        // A duplicate insert for a known row is ignored.
        engine.apply_change(ChangeEvent::Inserted(sample(id, "new", false)));
        assert_eq!(engine.grievances().len(), 1);

        engine.apply_change(ChangeEvent::Updated(sample(id, "renamed", true)));
        assert_eq!(engine.grievances()[0].title, "renamed");
        assert!(engine.grievances()[0].completed);

        engine.apply_change(ChangeEvent::Deleted(id));
        assert!(engine.grievances().is_empty());
    }
}
