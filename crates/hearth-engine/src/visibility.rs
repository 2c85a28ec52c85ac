//! Viewer-based visibility of projected occurrences.
//!
//! Parents see every occurrence; children see only occurrences of events they
//! are assigned to. This decides what the calendar *shows*. It is not an access
//! control mechanism: the storage layer must enforce who may read which events.

use serde::{Deserialize, Serialize};

use crate::event::{MemberId, Occurrence};

/// A family member's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
}

/// Who is looking at the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub role: Role,
    /// Required for children; ignored for parents.
    #[serde(default)]
    pub member_id: Option<MemberId>,
}

impl Viewer {
    pub fn parent() -> Self {
        Self {
            role: Role::Parent,
            member_id: None,
        }
    }

    pub fn child(member_id: impl Into<MemberId>) -> Self {
        Self {
            role: Role::Child,
            member_id: Some(member_id.into()),
        }
    }

    pub fn is_parent(&self) -> bool {
        self.role == Role::Parent
    }

    /// Whether this viewer may see `occurrence`.
    ///
    /// A child without a member id sees nothing, and an occurrence with no
    /// assigned members is never visible to a child.
    pub fn can_see(&self, occurrence: &Occurrence<'_>) -> bool {
        match (self.role, &self.member_id) {
            (Role::Parent, _) => true,
            (Role::Child, Some(member)) => occurrence.base().is_assigned_to(member),
            (Role::Child, None) => false,
        }
    }
}

/// Restrict `occurrences` to those `viewer` is entitled to see, preserving order.
pub fn filter<'a>(occurrences: Vec<Occurrence<'a>>, viewer: &Viewer) -> Vec<Occurrence<'a>> {
    match viewer.role {
        Role::Parent => occurrences,
        Role::Child if viewer.member_id.is_none() => {
            tracing::debug!("child viewer without member id, showing nothing");
            Vec::new()
        }
        Role::Child => occurrences
            .into_iter()
            .filter(|occurrence| viewer.can_see(occurrence))
            .collect(),
    }
}
