//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::error::{DatabaseError, ErrorKind};
use tracing::info;

use crate::{
    auth::{
        AuthServiceError, AuthenticatedSession, Credentials, IssuedSession, NewRegistration,
        SessionPolicy, SessionTokenVersion, SessionUuid, UserRecord, UserUuid,
        format_session_token, generate_session_secret,
        models::NewSession,
        parse_session_token,
        password::{hash_password, verify_password},
        repository::PgAuthRepository,
        session_verifier, validate_registration, verifiers_match,
    },
    database::Db,
    domain::profiles::{records::ProfileUuid, repository::PgProfilesRepository},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    profiles: PgProfilesRepository,
    policy: SessionPolicy,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, policy: SessionPolicy) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            profiles: PgProfilesRepository::new(),
            policy,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, registration: NewRegistration) -> Result<UserRecord, AuthServiceError> {
        validate_registration(&registration).map_err(AuthServiceError::Validation)?;

        let password_hash = hash_password(registration.password.clone()).await?;

        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .repository
            .create_user(
                &mut tx,
                UserUuid::new(),
                &registration.username,
                &registration.email,
                &password_hash,
            )
            .await
            .map_err(|error| {
                if matches!(
                    error.as_database_error().map(DatabaseError::kind),
                    Some(ErrorKind::UniqueViolation)
                ) {
                    AuthServiceError::UsernameTaken
                } else {
                    AuthServiceError::from(error)
                }
            })?;

        self.profiles
            .create_profile(&mut tx, ProfileUuid::new(), user.uuid)
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, username = %user.username, "registered user");

        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stored = self
            .repository
            .find_credentials_by_username(&mut tx, &credentials.username)
            .await?;

        tx.commit().await?;

        // Unknown usernames pay for a verify too.
        let verified = verify_password(
            credentials.password,
            stored.as_ref().map(|stored| stored.password_hash.clone()),
        )
        .await?;

        let stored = match stored {
            Some(stored) if verified => stored,
            _ => return Err(AuthServiceError::InvalidCredentials),
        };

        let mut tx = self.db.begin_transaction().await?;

        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, version, &secret);

        let expires_at = Timestamp::now()
            .checked_add(self.policy.ttl)
            .map_err(AuthServiceError::Expiry)?;

        let metadata = self
            .repository
            .create_session(
                &mut tx,
                &NewSession {
                    uuid: session_uuid,
                    user_uuid: stored.user.uuid,
                    version,
                    token_hash: session_verifier(session_uuid, version, stored.user.uuid, &secret),
                    expires_at,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user = %stored.user.uuid, session = %session_uuid, "issued session");

        Ok(IssuedSession {
            token,
            user: stored.user,
            metadata,
        })
    }

    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.revoke_session(&mut tx, session).await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::Unauthenticated);
        }

        tx.commit().await?;

        info!(session = %session, "revoked session");

        Ok(())
    }

    async fn authenticate_session(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedSession, AuthServiceError> {
        let parsed = parse_session_token(bearer_token)?;

        let mut tx = self.db.begin_transaction().await?;

        let session = self
            .repository
            .find_active_session(&mut tx, parsed.session_uuid)
            .await?
            .ok_or(AuthServiceError::Unauthenticated)?;

        tx.commit().await?;

        if session.version != parsed.version {
            return Err(AuthServiceError::Unauthenticated);
        }

        let verifier = session_verifier(
            parsed.session_uuid,
            parsed.version,
            session.user_uuid,
            &parsed.secret,
        );

        if !verifiers_match(&session.token_hash, &verifier) {
            return Err(AuthServiceError::Unauthenticated);
        }

        Ok(AuthenticatedSession {
            user: session.user_uuid,
            session: parsed.session_uuid,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a user and their empty profile.
    async fn register(&self, registration: NewRegistration) -> Result<UserRecord, AuthServiceError>;

    /// Check a username and password and open a new session.
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    /// Revoke a session so its token stops authenticating.
    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError>;

    /// Resolve a bearer token to the user and session it belongs to.
    async fn authenticate_session(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedSession, AuthServiceError>;
}
