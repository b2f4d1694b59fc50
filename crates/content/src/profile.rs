use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coursekit_core::{DomainError, UserId};

/// Public profile for a user.
///
/// The username is normalized to lowercase and immutable after creation;
/// everything else can be updated by the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a profile, validating and normalizing the inputs.
    pub fn new(
        user_id: UserId,
        username: &str,
        display_name: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let username = username.trim().to_lowercase();
        if username.is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::validation(
                "username may only contain letters, digits, '_' and '-'",
            ));
        }

        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(DomainError::validation("display name cannot be empty"));
        }

        Ok(Self {
            user_id,
            username,
            display_name: display_name.to_string(),
            bio: String::new(),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply an owner update; `None` fields are left unchanged.
    pub fn update(
        &mut self,
        display_name: Option<&str>,
        bio: Option<&str>,
        avatar_url: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if let Some(display_name) = display_name {
            let display_name = display_name.trim();
            if display_name.is_empty() {
                return Err(DomainError::validation("display name cannot be empty"));
            }
            self.display_name = display_name.to_string();
        }

        if let Some(bio) = bio {
            self.bio = bio.trim().to_string();
        }

        if let Some(avatar_url) = avatar_url {
            self.avatar_url = Some(avatar_url);
        }

        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_normalizes_the_username() {
        let profile = Profile::new(UserId::new(), "  Ada_Lovelace ", "Ada", Utc::now()).unwrap();
        assert_eq!(profile.username, "ada_lovelace");
        assert_eq!(profile.display_name, "Ada");
        assert!(profile.bio.is_empty());
    }

    #[test]
    fn username_with_spaces_is_rejected() {
        let result = Profile::new(UserId::new(), "ada lovelace", "Ada", Utc::now());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn update_leaves_unset_fields_alone() {
        let mut profile = Profile::new(UserId::new(), "ada", "Ada", Utc::now()).unwrap();

        profile
            .update(None, Some("Writes about compilers."), None, Utc::now())
            .unwrap();

        assert_eq!(profile.display_name, "Ada");
        assert_eq!(profile.bio, "Writes about compilers.");
        assert!(profile.avatar_url.is_none());
    }

    #[test]
    fn blank_display_name_update_is_rejected() {
        let mut profile = Profile::new(UserId::new(), "ada", "Ada", Utc::now()).unwrap();
        let result = profile.update(Some("  "), None, None, Utc::now());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
