//! Profile model and the field-merge policy for partial form updates.

use serde::{Deserialize, Serialize};

/// Per-user display record, one row per identity (`id` = auth user id).
///
/// All display fields are nullable on the service side; `None` fields are
/// dropped from outbound payloads so the table's defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Free-text favorites list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial profile update.
///
/// Merge policy: a field absent from the form (`None`) keeps the stored
/// value; a field present but empty (`Some("")`) overwrites with the empty
/// string. `None` fields are dropped from the outbound payload entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Write timestamp, stamped by the store right before sending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ProfileChanges {
    /// Copy with the write timestamp set.
    pub fn stamped(mut self, timestamp: String) -> Self {
        self.updated_at = Some(timestamp);
        self
    }
}

impl Profile {
    /// A profile with no stored fields, for identities that have not saved
    /// anything yet.
    pub fn empty(user_id: &str) -> Self {
        Self {
            id: user_id.to_string(),
            ..Default::default()
        }
    }

    /// Apply a partial update over this row. Absent fields keep the stored
    /// value; present fields overwrite, including with the empty string.
    pub fn merged(&self, changes: &ProfileChanges) -> Profile {
        Profile {
            id: self.id.clone(),
            display_name: changes.display_name.clone().or_else(|| self.display_name.clone()),
            email: changes.email.clone().or_else(|| self.email.clone()),
            bio: changes.bio.clone().or_else(|| self.bio.clone()),
            top5: changes.top5.clone().or_else(|| self.top5.clone()),
            handle: changes.handle.clone().or_else(|| self.handle.clone()),
            avatar_url: changes.avatar_url.clone().or_else(|| self.avatar_url.clone()),
            updated_at: changes.updated_at.clone().or_else(|| self.updated_at.clone()),
        }
    }

    /// Build the first row for an identity from a partial update.
    pub fn from_changes(user_id: &str, changes: &ProfileChanges) -> Profile {
        Profile::empty(user_id).merged(changes)
    }
}
