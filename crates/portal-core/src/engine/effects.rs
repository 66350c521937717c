//! Effects emitted by the engine and change events applied to it
//!
//! The engine never performs IO. Event methods return [`Effect`] values
//! describing the store and relay calls the host boundary must make, and
//! the host reports outcomes back through the engine's `on_*` methods.

use serde::Serialize;
use uuid::Uuid;

use crate::grievance::{NewGrievance, NotifyKind};

/// A side effect for the host boundary to execute
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    /// Fetch the full grievance list; the generation tags the response
    RefreshList { generation: u64 },
    /// Insert a sanitized grievance row
    InsertGrievance { grievance: NewGrievance },
    /// Set the completed flag on one row
    UpdateGrievance { id: Uuid, completed: bool },
    /// Delete one row
    DeleteGrievance { id: Uuid },
    /// Forward a notification through the chat relay.
    ///
    /// `automatic` marks the post-submission send; its completion settles
    /// separately from the manual pings' flags and cooldowns.
    SendNotification {
        kind: NotifyKind,
        automatic: bool,
        title: String,
        description: String,
    },
}

/// Store change-feed event applied to the local list
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeEvent {
    Inserted(crate::grievance::Grievance),
    Updated(crate::grievance::Grievance),
    Deleted(Uuid),
}
