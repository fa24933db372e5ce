//! Profiles service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::UserUuid,
    database::Db,
    domain::profiles::{
        data::NewLedgerEntry,
        errors::ProfilesServiceError,
        records::{LedgerEntryKind, LedgerEntryRecord, LedgerEntryUuid, ProfileRecord, ProfileUuid},
        repository::PgProfilesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn list_profiles(&self) -> Result<Vec<ProfileRecord>, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profiles = self.repository.list_profiles(&mut tx).await?;

        tx.commit().await?;

        Ok(profiles)
    }

    async fn get_profile(&self, profile: ProfileUuid) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profile = self.repository.get_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(profile)
    }

    async fn get_profile_for_user(
        &self,
        user: UserUuid,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profile = self.repository.get_profile_for_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(profile)
    }

    async fn add_funds(
        &self,
        profile: ProfileUuid,
        amount: i64,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self.repository.lock_profile(&mut tx, profile).await?;

        let balance = current
            .balance
            .checked_add(amount)
            .ok_or(ProfilesServiceError::InvalidAmount)?;

        let updated = self
            .repository
            .set_balances(&mut tx, profile, balance, current.reward_points)
            .await?;

        self.repository
            .create_ledger_entry(
                &mut tx,
                &NewLedgerEntry {
                    uuid: LedgerEntryUuid::new(),
                    profile,
                    kind: LedgerEntryKind::FundsAdded,
                    balance_delta: amount,
                    points_delta: 0,
                    balance_after: updated.balance,
                    points_after: updated.reward_points,
                    order: None,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            profile = %profile,
            amount,
            balance = updated.balance,
            "added funds to profile"
        );

        Ok(updated)
    }

    async fn list_ledger_entries(
        &self,
        profile: ProfileUuid,
    ) -> Result<Vec<LedgerEntryRecord>, ProfilesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Distinguishes an unknown profile from one with no history.
        self.repository.get_profile(&mut tx, profile).await?;

        let entries = self.repository.list_ledger_entries(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(entries)
    }
}

#[automock]
#[async_trait]
pub trait ProfilesService: Send + Sync {
    /// Retrieve every profile, ordered by username.
    async fn list_profiles(&self) -> Result<Vec<ProfileRecord>, ProfilesServiceError>;

    async fn get_profile(&self, profile: ProfileUuid) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Retrieve the profile owned by a user.
    async fn get_profile_for_user(
        &self,
        user: UserUuid,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Add `amount` to a profile's balance and record it in the ledger.
    ///
    /// The amount is not sign-checked; only overflow is rejected.
    async fn add_funds(
        &self,
        profile: ProfileUuid,
        amount: i64,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Retrieve a profile's ledger, newest first.
    async fn list_ledger_entries(
        &self,
        profile: ProfileUuid,
    ) -> Result<Vec<LedgerEntryRecord>, ProfilesServiceError>;
}
