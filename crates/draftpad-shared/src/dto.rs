//! Data Transfer Objects - what a post list renders for each post.

use chrono::{DateTime, Utc};
use serde::Serialize;

use draftpad_core::domain::{Post, PostStatus};

/// Characters of body text shown before the excerpt is cut.
pub const EXCERPT_LENGTH: usize = 120;

/// Summary card for one post in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub status_label: String,
    pub created: String,
    pub updated: String,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        let title = if post.title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            post.title.clone()
        };

        Self {
            id: post.id.clone(),
            title,
            excerpt: excerpt(&post.body, EXCERPT_LENGTH),
            tags: post.tags.clone(),
            status_label: status_label(post.status).to_string(),
            created: format_date(post.created_at),
            updated: format_date(post.updated_at),
        }
    }
}

pub fn status_label(status: PostStatus) -> &'static str {
    match status {
        PostStatus::Draft => "Draft",
        PostStatus::Published => "Published",
    }
}

/// Body text cut to `max` characters, or a placeholder when empty.
pub fn excerpt(body: &str, max: usize) -> String {
    if body.is_empty() {
        return "No content".to_string();
    }
    match body.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Short date such as `Mar 4, 2025`; `-` for unsaved posts.
pub fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}
