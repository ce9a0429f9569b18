use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Draft => f.write_str("draft"),
            PostStatus::Published => f.write_str("published"),
        }
    }
}

/// Post entity - a blog post, either an unsaved draft or a stored record.
///
/// `id` stays empty until the first successful save; the repository assigns
/// it and both timestamps. The body is stored under the `content` key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create an empty, unsaved draft.
    pub fn draft() -> Self {
        Self::default()
    }

    /// Create an unsaved draft with a title and body.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Whether the repository has assigned an identifier yet.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Add a tag. Input is trimmed; empty and duplicate tags are ignored.
    ///
    /// Returns `true` when the tag list changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Remove a tag by exact match. Returns `true` when the tag list changed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Replace the tag list, rejecting duplicates and blank entries.
    pub fn set_tags<I, S>(&mut self, tags: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() {
                return Err(DomainError::Validation("tags must not be blank".into()));
            }
            if next.iter().any(|t| t == tag) {
                return Err(DomainError::Validation(format!("duplicate tag: {tag}")));
            }
            next.push(tag.to_string());
        }
        self.tags = next;
        Ok(())
    }

    /// Change-detection signature of this post's content.
    pub fn signature(&self) -> String {
        signature(self)
    }
}

/// Derive a deterministic content signature from title, body and tag set.
///
/// Tags are compared as a set, so ordering and history do not matter. The
/// tuple is JSON-encoded which keeps field boundaries unambiguous.
pub fn signature(post: &Post) -> String {
    let tags: BTreeSet<&str> = post.tags.iter().map(String::as_str).collect();
    serde_json::json!([post.title, post.body, tags]).to_string()
}

/// List filter used by the post list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostFilter {
    #[default]
    All,
    Drafts,
    Published,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::All => true,
            PostFilter::Drafts => post.status == PostStatus::Draft,
            PostFilter::Published => post.status == PostStatus::Published,
        }
    }
}

impl FromStr for PostFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(PostFilter::All),
            "draft" | "drafts" => Ok(PostFilter::Drafts),
            "published" => Ok(PostFilter::Published),
            other => Err(DomainError::Validation(format!("unknown filter: {other}"))),
        }
    }
}
