//! Songs and their publication status.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;
use uuid::Uuid;

use super::{ClosedEnum, FieldReader};
use crate::error::ValidationError;
use crate::types::{parse_timestamp, Timestamp};

/// Entity name used in validation errors.
pub const SONG_ENTITY: &str = "song";

/// Minimum title length, in characters.
pub const MIN_TITLE_LEN: usize = 1;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Being edited in the admin panel; hidden from the mobile app.
pub const STATUS_DRAFT: &str = "draft";
/// Visible to everyone.
pub const STATUS_PUBLISHED: &str = "published";

/// All valid song statuses.
pub const VALID_SONG_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SongStatus {
    Draft,
    Published,
}

impl SongStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Published => STATUS_PUBLISHED,
        }
    }
}

impl ClosedEnum for SongStatus {
    const ALLOWED: &'static [&'static str] = VALID_SONG_STATUSES;

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            STATUS_DRAFT => Some(Self::Draft),
            STATUS_PUBLISHED => Some(Self::Published),
            _ => None,
        }
    }
}

impl fmt::Display for SongStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Song
// ---------------------------------------------------------------------------

/// A validated song record.
///
/// Constructed by [`validate_song`] or [`crate::dto::NewSong::into_song`];
/// the title is never empty and the status is always one of
/// [`VALID_SONG_STATUSES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Song {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) composer: Option<String>,
    pub(crate) lyrics_markdown: Option<String>,
    pub(crate) status: SongStatus,
    pub(crate) created_at: Timestamp,
    pub(crate) updated_at: Option<Timestamp>,
    pub(crate) published_at: Option<Timestamp>,
}

impl Song {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn composer(&self) -> Option<&str> {
        self.composer.as_deref()
    }

    pub fn lyrics_markdown(&self) -> Option<&str> {
        self.lyrics_markdown.as_deref()
    }

    pub fn status(&self) -> SongStatus {
        self.status
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    pub fn published_at(&self) -> Option<&str> {
        self.published_at.as_deref()
    }

    pub fn is_published(&self) -> bool {
        self.status == SongStatus::Published
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        self.published_at.as_deref().and_then(parse_timestamp)
    }

    /// Mark the song published as of `at`.
    pub fn publish(&mut self, at: impl Into<Timestamp>) {
        let at = at.into();
        self.status = SongStatus::Published;
        self.published_at = Some(at.clone());
        self.updated_at = Some(at);
    }

    /// Return the song to draft, clearing its publication time.
    pub fn unpublish(&mut self, at: impl Into<Timestamp>) {
        self.status = SongStatus::Draft;
        self.published_at = None;
        self.updated_at = Some(at.into());
    }
}

/// Validate an untrusted value against the song schema.
pub fn validate_song(input: &Value) -> Result<Song, ValidationError> {
    let mut reader = FieldReader::new(SONG_ENTITY, input)?;

    let id = reader.uuid("id");
    let title = reader.string_min("title", MIN_TITLE_LEN);
    let composer = reader.nullable_string("composer");
    let lyrics_markdown = reader.nullable_string("lyrics_markdown");
    let status = reader.one_of::<SongStatus>("status");
    let created_at = reader.string("created_at");
    let updated_at = reader.nullable_string("updated_at");
    let published_at = reader.nullable_string("published_at");

    match (
        id,
        title,
        composer,
        lyrics_markdown,
        status,
        created_at,
        updated_at,
        published_at,
    ) {
        (
            Some(id),
            Some(title),
            Some(composer),
            Some(lyrics_markdown),
            Some(status),
            Some(created_at),
            Some(updated_at),
            Some(published_at),
        ) if reader.is_clean() => Ok(Song {
            id,
            title,
            composer,
            lyrics_markdown,
            status,
            created_at,
            updated_at,
            published_at,
        }),
        _ => Err(reader.into_error()),
    }
}
