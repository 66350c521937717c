//! Live change-feed payload parsing
//!
//! The store pushes row-level change events as JSON. Inserts and updates
//! carry the full new row; deletes carry only the old row's primary key.

use portal_core::{ChangeEvent, Grievance};
use serde::Deserialize;
use uuid::Uuid;

use crate::http::NetError;

#[derive(Deserialize)]
#[serde(tag = "eventType")]
enum WireChange {
    #[serde(rename = "INSERT")]
    Insert { new: Grievance },
    #[serde(rename = "UPDATE")]
    Update { new: Grievance },
    #[serde(rename = "DELETE")]
    Delete { old: DeletedRow },
}

#[derive(Deserialize)]
struct DeletedRow {
    id: Uuid,
}

/// Parse one change-feed payload into an engine event
pub fn parse_change(json: &str) -> Result<ChangeEvent, NetError> {
    let wire: WireChange = serde_json::from_str(json)?;
    Ok(match wire {
        WireChange::Insert { new } => ChangeEvent::Inserted(new),
        WireChange::Update { new } => ChangeEvent::Updated(new),
        WireChange::Delete { old } => ChangeEvent::Deleted(old.id),
    })
}
