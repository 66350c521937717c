//! Full-screen view, role, and theme enums

use serde::{Deserialize, Serialize};

/// Which partner is using the portal.
///
/// A client-local viewing mode, not a server-enforced permission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Secondary,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
        }
    }

    /// Parse a wire name, `None` for anything unknown
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "primary" => Some(Role::Primary),
            "secondary" => Some(Role::Secondary),
            _ => None,
        }
    }
}

/// Full-screen view of the portal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum View {
    /// Password entry; nothing protected renders
    Locked,
    /// Authenticated landing screen
    RoleSelection,
    /// The portal proper for one role
    Portal { role: Role },
}

impl View {
    /// True for any view behind the authentication gate
    pub fn is_protected(&self) -> bool {
        !matches!(self, View::Locked)
    }
}

/// Presentation theme passed down to the views
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
