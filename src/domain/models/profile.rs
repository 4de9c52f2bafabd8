use uuid::Uuid;

use crate::domain::{errors::ValidationError, value_objects::UserId};

/// A user record with an optional link to its uploaded profile image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    id: UserId,
    username: String,
    profile_image_link: Option<String>,
}

impl UserProfile {
    /// Create a profile without an image link
    pub fn new(id: UserId, username: impl Into<String>) -> Result<Self, ValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }

        Ok(Self {
            id,
            username,
            profile_image_link: None,
        })
    }

    /// Rebuild a profile from a persisted record
    pub fn restore(
        id: UserId,
        username: impl Into<String>,
        profile_image_link: Option<String>,
    ) -> Result<Self, ValidationError> {
        let mut profile = Self::new(id, username)?;
        profile.profile_image_link = profile_image_link;
        Ok(profile)
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn profile_image_link(&self) -> Option<&str> {
        self.profile_image_link.as_deref()
    }

    /// Point the profile at a newly stored image, replacing any previous link
    pub fn set_profile_image_link(&mut self, url: impl Into<String>) {
        self.profile_image_link = Some(url.into());
    }
}

pub const ALICE_ID: Uuid = Uuid::from_u128(0x11111111_1111_1111_1111_111111111111);
pub const BOB_ID: Uuid = Uuid::from_u128(0x22222222_2222_2222_2222_222222222222);

/// Profiles every freshly initialized repository starts with
pub fn sample_profiles() -> Vec<UserProfile> {
    vec![
        UserProfile {
            id: UserId::new(ALICE_ID),
            username: "alice".to_string(),
            profile_image_link: None,
        },
        UserProfile {
            id: UserId::new(BOB_ID),
            username: "bob".to_string(),
            profile_image_link: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_username_is_rejected() {
        assert_eq!(
            UserProfile::new(UserId::generate(), "  "),
            Err(ValidationError::EmptyUsername)
        );
    }

    #[test]
    fn test_sample_ids_match_their_literal_form() {
        assert_eq!(ALICE_ID.to_string(), "11111111-1111-1111-1111-111111111111");
        assert_eq!(BOB_ID.to_string(), "22222222-2222-2222-2222-222222222222");
    }

    #[test]
    fn test_later_link_overwrites_earlier_one() {
        let mut profile = UserProfile::new(UserId::generate(), "carol").unwrap();
        assert_eq!(profile.profile_image_link(), None);

        profile.set_profile_image_link("https://example.com/a.png");
        profile.set_profile_image_link("https://example.com/b.png");
        assert_eq!(profile.profile_image_link(), Some("https://example.com/b.png"));
    }
}
