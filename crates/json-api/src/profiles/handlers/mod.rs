//! Profile Handlers

pub(crate) mod add_funds;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod ledger;
pub(crate) mod me;
