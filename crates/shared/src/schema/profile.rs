//! User account profiles.

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
pub const PROFILE_ENTITY: &str = "profile";

// ---------------------------------------------------------------------------
// Role constants
// ---------------------------------------------------------------------------

/// Regular account: reads published songs.
pub const ROLE_USER: &str = "user";
/// Administrator: manages songs from the admin panel.
pub const ROLE_ADMIN: &str = "admin";

/// All valid roles.
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];

/// Account role. Closed set: nothing outside [`VALID_ROLES`] is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => ROLE_USER,
            Self::Admin => ROLE_ADMIN,
        }
    }
}

impl ClosedEnum for Role {
    const ALLOWED: &'static [&'static str] = VALID_ROLES;

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            ROLE_USER => Some(Self::User),
            ROLE_ADMIN => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// A validated user profile.
///
/// Only [`validate_profile`] produces values of this type, so every
/// `Profile` in memory has a well-formed id and a role from the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Profile {
    id: Uuid,
    display_name: Option<String>,
    role: Role,
    created_at: Timestamp,
    updated_at: Option<Timestamp>,
}

impl Profile {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// `created_at` as a UTC instant, when it is RFC 3339.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

/// Validate an untrusted value against the profile schema.
pub fn validate_profile(input: &Value) -> Result<Profile, ValidationError> {
    let mut reader = FieldReader::new(PROFILE_ENTITY, input)?;

    let id = reader.uuid("id");
    let display_name = reader.nullable_string("display_name");
    let role = reader.one_of::<Role>("role");
    let created_at = reader.string("created_at");
    let updated_at = reader.nullable_string("updated_at");

    match (id, display_name, role, created_at, updated_at) {
        (Some(id), Some(display_name), Some(role), Some(created_at), Some(updated_at))
            if reader.is_clean() =>
        {
            Ok(Profile {
                id,
                display_name,
                role,
                created_at,
                updated_at,
            })
        }
        _ => Err(reader.into_error()),
    }
}
