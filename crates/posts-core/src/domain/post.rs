use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

/// Primary key of a post. Assigned by the store, never reused.
pub type PostId = i64;

/// Longest title accepted, in characters.
pub const TITLE_MAX_CHARS: usize = 255;

/// Post entity - a titled record with timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Name used in not-found errors and logs.
    pub const ENTITY: &'static str = "Post";
}

/// The `title` field as it arrived from the caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleInput {
    /// The field was absent or null.
    Missing,
    /// The field was a string.
    Text(String),
    /// The field was present but not a string.
    NotText,
}

/// Validated post fields, ready to be written by a repository.
///
/// The only way to obtain one is [`PostDraft::validate`], so an invalid title
/// cannot reach storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
}

impl PostDraft {
    /// Validate raw input. The title is trimmed before being checked.
    pub fn validate(title: TitleInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = match title {
            TitleInput::Missing => None,
            TitleInput::NotText => {
                errors.add("title", "The title must be a string.");
                None
            }
            TitleInput::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else if trimmed.chars().count() > TITLE_MAX_CHARS {
                    errors.add(
                        "title",
                        format!("The title may not be greater than {TITLE_MAX_CHARS} characters."),
                    );
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        };

        match title {
            Some(title) if errors.is_empty() => Ok(Self { title }),
            _ => {
                if errors.is_empty() {
                    errors.add("title", "The title field is required.");
                }
                Err(errors)
            }
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn into_title(self) -> String {
        self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> TitleInput {
        TitleInput::Text(s.to_string())
    }

    #[test]
    fn test_valid_title_is_trimmed() {
        let draft = PostDraft::validate(text("  El post de prueba \n")).unwrap();
        assert_eq!(draft.title(), "El post de prueba");
    }

    #[test]
    fn test_empty_and_blank_titles_are_required() {
        for input in [TitleInput::Missing, text(""), text("   \t")] {
            let errors = PostDraft::validate(input).unwrap_err();
            assert_eq!(
                errors.messages("title"),
                ["The title field is required.".to_string()]
            );
        }
    }

    #[test]
    fn test_non_string_title_is_rejected() {
        let errors = PostDraft::validate(TitleInput::NotText).unwrap_err();
        assert_eq!(errors.messages("title"), ["The title must be a string.".to_string()]);
    }

    #[test]
    fn test_length_is_counted_in_characters() {
        let at_limit = "ñ".repeat(TITLE_MAX_CHARS);
        assert!(PostDraft::validate(text(&at_limit)).is_ok());

        let over_limit = "a".repeat(TITLE_MAX_CHARS + 1);
        let errors = PostDraft::validate(text(&over_limit)).unwrap_err();
        assert!(errors.messages("title")[0].contains("255"));
    }
}
