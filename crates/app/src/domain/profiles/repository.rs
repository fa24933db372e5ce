//! Profiles Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::{UserUuid, repository::joined_user},
    database::{encode_amount, try_get_amount},
    domain::{
        orders::records::OrderUuid,
        profiles::{
            data::NewLedgerEntry,
            records::{LedgerEntryKind, LedgerEntryRecord, LedgerEntryUuid, ProfileRecord, ProfileUuid},
        },
    },
};

const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const LIST_PROFILES_SQL: &str = include_str!("sql/list_profiles.sql");
const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");
const GET_PROFILE_FOR_USER_SQL: &str = include_str!("sql/get_profile_for_user.sql");
const LOCK_PROFILE_SQL: &str = include_str!("sql/lock_profile.sql");
const LOCK_PROFILE_FOR_USER_SQL: &str = include_str!("sql/lock_profile_for_user.sql");
const SET_BALANCES_SQL: &str = include_str!("sql/set_balances.sql");
const CREATE_LEDGER_ENTRY_SQL: &str = include_str!("sql/create_ledger_entry.sql");
const LIST_LEDGER_ENTRIES_SQL: &str = include_str!("sql/list_ledger_entries.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProfilesRepository;

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_PROFILE_SQL)
            .bind(profile.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_profiles(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProfileRecord>, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(LIST_PROFILES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(GET_PROFILE_SQL)
            .bind(profile.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_profile_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(GET_PROFILE_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Load a profile and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(LOCK_PROFILE_SQL)
            .bind(profile.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Load a user's profile and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_profile_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(LOCK_PROFILE_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_balances(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        balance: i64,
        reward_points: u64,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(SET_BALANCES_SQL)
            .bind(profile.into_uuid())
            .bind(balance)
            .bind(encode_amount("reward_points", reward_points)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_ledger_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: &NewLedgerEntry,
    ) -> Result<LedgerEntryRecord, sqlx::Error> {
        query_as::<Postgres, LedgerEntryRecord>(CREATE_LEDGER_ENTRY_SQL)
            .bind(entry.uuid.into_uuid())
            .bind(entry.profile.into_uuid())
            .bind(entry.kind.as_str())
            .bind(entry.balance_delta)
            .bind(entry.points_delta)
            .bind(entry.balance_after)
            .bind(encode_amount("points_after", entry.points_after)?)
            .bind(entry.order.map(OrderUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_ledger_entries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<Vec<LedgerEntryRecord>, sqlx::Error> {
        query_as::<Postgres, LedgerEntryRecord>(LIST_LEDGER_ENTRIES_SQL)
            .bind(profile.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProfileUuid::from_uuid(row.try_get("uuid")?),
            user: joined_user(row)?,
            balance: row.try_get("balance")?,
            reward_points: try_get_amount(row, "reward_points")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for LedgerEntryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;
        let kind = LedgerEntryKind::try_from(kind.as_str()).map_err(|e| sqlx::Error::ColumnDecode {
            index: "kind".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: LedgerEntryUuid::from_uuid(row.try_get("uuid")?),
            profile_uuid: ProfileUuid::from_uuid(row.try_get("profile_uuid")?),
            kind,
            balance_delta: row.try_get("balance_delta")?,
            points_delta: row.try_get("points_delta")?,
            balance_after: row.try_get("balance_after")?,
            points_after: try_get_amount(row, "points_after")?,
            order_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("order_uuid")?
                .map(OrderUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
