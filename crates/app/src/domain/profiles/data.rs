//! Profile Data

use crate::domain::{
    orders::records::OrderUuid,
    profiles::records::{LedgerEntryKind, LedgerEntryUuid, ProfileUuid},
};

/// A balance/points change to append to a profile's ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewLedgerEntry {
    pub uuid: LedgerEntryUuid,
    pub profile: ProfileUuid,
    pub kind: LedgerEntryKind,
    pub balance_delta: i64,
    pub points_delta: i64,
    pub balance_after: i64,
    pub points_after: u64,
    pub order: Option<OrderUuid>,
}
