//! Profile Records

use jiff::Timestamp;

use crate::{auth::UserRecord, domain::orders::records::OrderUuid, uuids::TypedUuid};

/// Profile UUID
pub type ProfileUuid = TypedUuid<ProfileRecord>;

/// Ledger Entry UUID
pub type LedgerEntryUuid = TypedUuid<LedgerEntryRecord>;

/// Profile Record
///
/// One per user. Holds the spendable balance and the loyalty points balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub uuid: ProfileUuid,
    pub user: UserRecord,

    /// Balance in pence/cents. Funds additions are not sign-checked, so this may be negative.
    pub balance: i64,

    pub reward_points: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// What caused a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEntryKind {
    OrderPlaced,
    FundsAdded,
}

impl LedgerEntryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrderPlaced => "order",
            Self::FundsAdded => "funds",
        }
    }
}

impl TryFrom<&str> for LedgerEntryKind {
    type Error = UnknownLedgerEntryKind;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "order" => Ok(Self::OrderPlaced),
            "funds" => Ok(Self::FundsAdded),
            other => Err(UnknownLedgerEntryKind(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown ledger entry kind {0:?}")]
pub struct UnknownLedgerEntryKind(String);

/// Ledger Entry Record
///
/// Append-only trail of every balance or points change on a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntryRecord {
    pub uuid: LedgerEntryUuid,
    pub profile_uuid: ProfileUuid,
    pub kind: LedgerEntryKind,
    pub balance_delta: i64,
    pub points_delta: i64,
    pub balance_after: i64,
    pub points_after: u64,
    pub order_uuid: Option<OrderUuid>,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_entry_kind_round_trips_through_storage_name() {
        for kind in [LedgerEntryKind::OrderPlaced, LedgerEntryKind::FundsAdded] {
            assert_eq!(LedgerEntryKind::try_from(kind.as_str()).ok(), Some(kind));
        }
    }

    #[test]
    fn unknown_ledger_entry_kind_is_rejected() {
        assert!(LedgerEntryKind::try_from("refund").is_err());
    }
}
