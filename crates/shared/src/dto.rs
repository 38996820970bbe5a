//! Create/update DTOs for songs edited in the admin panel.
//!
//! Form submissions deserialize into these, are checked with `validator`,
//! and only then become (or modify) a [`Song`].

use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use crate::error::{FieldViolation, ValidationError};
use crate::schema::song::{Song, SongStatus, SONG_ENTITY};
use crate::types::{now_timestamp, Timestamp};

/// DTO for creating a new song. New songs always start as drafts.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSong {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub composer: Option<String>,
    pub lyrics_markdown: Option<String>,
}

impl NewSong {
    /// Validate and turn into a draft [`Song`] with a fresh id, created now.
    pub fn into_song(self) -> Result<Song, ValidationError> {
        self.into_song_at(Uuid::new_v4(), now_timestamp())
    }

    /// Like [`NewSong::into_song`] with a caller-chosen id and creation time.
    pub fn into_song_at(
        self,
        id: Uuid,
        created_at: impl Into<Timestamp>,
    ) -> Result<Song, ValidationError> {
        self.validate()
            .map_err(|e| from_validator(SONG_ENTITY, &e))?;
        Ok(Song {
            id,
            title: self.title,
            composer: self.composer,
            lyrics_markdown: self.lyrics_markdown,
            status: SongStatus::Draft,
            created_at: created_at.into(),
            updated_at: None,
            published_at: None,
        })
    }
}

/// DTO for editing an existing song. All fields are optional.
///
/// For the nullable fields, an absent key leaves the value unchanged while an
/// explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSong {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub composer: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub lyrics_markdown: Option<Option<String>>,
}

impl UpdateSong {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.composer.is_none() && self.lyrics_markdown.is_none()
    }
}

impl Song {
    /// Apply an edit, stamping `updated_at`. Nothing changes if the update is
    /// invalid.
    pub fn apply_update(
        &mut self,
        update: UpdateSong,
        at: impl Into<Timestamp>,
    ) -> Result<(), ValidationError> {
        update
            .validate()
            .map_err(|e| from_validator(SONG_ENTITY, &e))?;
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(composer) = update.composer {
            self.composer = composer;
        }
        if let Some(lyrics) = update.lyrics_markdown {
            self.lyrics_markdown = lyrics;
        }
        self.updated_at = Some(at.into());
        Ok(())
    }
}

/// Distinguish a missing key (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Map derive-based field errors onto the shared violation taxonomy.
///
/// Every DTO rule is a string length rule, so each becomes a
/// [`crate::ViolationKind::FormatViolation`].
fn from_validator(entity: &str, errors: &validator::ValidationErrors) -> ValidationError {
    let mut violations = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for e in field_errors.iter() {
            let expected = match e.params.get("min") {
                Some(min) => format!("at least {min} character(s)"),
                None => e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            };
            let received = e
                .params
                .get("value")
                .map(|v| v.to_string())
                .unwrap_or_default();
            violations.push(FieldViolation::format(field.to_string(), expected, received));
        }
    }
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    ValidationError::new(entity, violations)
}
