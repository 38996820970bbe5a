//! Shared data model for the songbook admin panel and mobile app.
//!
//! Raw records (parsed JSON, form submissions) enter through
//! [`validate_profile`] and [`validate_song`]. Both return either a typed
//! record whose invariants hold for its whole lifetime, or a
//! [`ValidationError`] listing every field that broke the schema.

pub mod dto;
pub mod error;
pub mod schema;
pub mod types;

pub use error::{FieldViolation, ValidationError, ViolationKind};
pub use schema::profile::{validate_profile, Profile, Role};
pub use schema::song::{validate_song, Song, SongStatus};
