//! Auth data models.

use std::fmt;

use jiff::{SignedDuration, Timestamp};

use crate::{auth::SessionTokenVersion, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Session UUID
pub type SessionUuid = TypedUuid<SessionMetadata>;

/// Public view of a registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// Stored password verifier for a user, used only during login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub user: UserRecord,
    pub password_hash: String,
}

/// Session data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,

    /// SHA-256 verifier of the token secret material.
    pub token_hash: String,
}

/// Session metadata persisted in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMetadata {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: UserRecord,
    pub metadata: SessionMetadata,
}

/// Identity established for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub user: UserUuid,
    pub session: SessionUuid,
}

/// Registration request data.
#[derive(Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewRegistration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Login request data.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// How long issued sessions stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub ttl: SignedDuration,
}

impl SessionPolicy {
    #[must_use]
    pub fn from_hours(hours: u32) -> Self {
        Self {
            ttl: SignedDuration::from_hours(i64::from(hours)),
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::from_hours(24)
    }
}
