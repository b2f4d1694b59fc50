use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coursekit_core::{ContentId, DomainError, UserId};

/// Editorial category of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Blog,
    Course,
    Notebook,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Blog => "blog",
            Category::Course => "course",
            Category::Notebook => "notebook",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may read an item once it is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Premium,
}

/// Publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
}

/// A content item in the catalog.
///
/// # Invariants
/// - `title` and `body` are non-empty (inputs are trimmed on creation).
/// - `published_at` is set iff `status == Published`.
/// - Publishing is one-way; a published item cannot be published again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub author_id: UserId,
    pub title: String,
    pub body: String,
    pub category: Category,
    pub visibility: Visibility,
    pub status: ContentStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Create a draft, validating and normalizing the inputs.
    pub fn draft(
        id: ContentId,
        author_id: UserId,
        title: &str,
        body: &str,
        category: Category,
        visibility: Visibility,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }

        let body = body.trim();
        if body.is_empty() {
            return Err(DomainError::validation("body cannot be empty"));
        }

        Ok(Self {
            id,
            author_id,
            title: title.to_string(),
            body: body.to_string(),
            category,
            visibility,
            status: ContentStatus::Draft,
            published_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Transition a draft to published, stamping `published_at`.
    pub fn publish(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status == ContentStatus::Published {
            return Err(DomainError::invariant("item is already published"));
        }

        self.status = ContentStatus::Published;
        self.published_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }
}
