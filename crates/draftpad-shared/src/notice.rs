//! Transient status notices shown while a draft is being saved.

use serde::Serialize;

use draftpad_core::domain::SaveStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A notice for a non-idle save status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusNotice {
    pub level: NoticeLevel,
    pub message: &'static str,
}

impl StatusNotice {
    /// Notice for `status`, or `None` when nothing should be shown.
    pub fn for_status(status: SaveStatus) -> Option<Self> {
        let (level, message) = match status {
            SaveStatus::Idle => return None,
            SaveStatus::Saving => (NoticeLevel::Info, "Saving..."),
            SaveStatus::Saved => (NoticeLevel::Success, "Saved"),
            SaveStatus::Error => (NoticeLevel::Error, "Error saving"),
        };
        Some(Self { level, message })
    }
}
