//! # Draftpad Shared
//!
//! View types shared by presentation front ends: list summaries and status
//! notices derived from the core domain.

pub mod dto;
pub mod notice;

pub use dto::PostSummary;
pub use notice::{NoticeLevel, StatusNotice};
