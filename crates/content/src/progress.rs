use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coursekit_core::{ContentId, DomainError, UserId};

/// Per-user progress through a course's sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseProgress {
    pub user_id: UserId,
    pub content_id: ContentId,
    pub completed_sections: u32,
    pub total_sections: u32,
    pub updated_at: DateTime<Utc>,
}

impl CourseProgress {
    /// Start tracking a course.
    pub fn start(
        user_id: UserId,
        content_id: ContentId,
        total_sections: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if total_sections == 0 {
            return Err(DomainError::validation(
                "a course needs at least one section",
            ));
        }

        Ok(Self {
            user_id,
            content_id,
            completed_sections: 0,
            total_sections,
            updated_at: now,
        })
    }

    /// Record completion; clamped to the section count so progress can never
    /// exceed 100%.
    pub fn record(&mut self, completed_sections: u32, now: DateTime<Utc>) {
        self.completed_sections = completed_sections.min(self.total_sections);
        self.updated_at = now;
    }

    pub fn percent(&self) -> u8 {
        (u64::from(self.completed_sections) * 100 / u64::from(self.total_sections)) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.completed_sections == self.total_sections
    }
}
