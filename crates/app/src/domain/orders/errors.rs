//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    menu::records::MenuItemUuid,
    orders::pricing::{PricingError, SettlementError},
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("insufficient reward points")]
    InsufficientPoints,

    #[error("invalid order: {0}")]
    InvalidOrder(PricingError),

    #[error("menu item {0} not found")]
    MenuItemNotFound(MenuItemUuid),

    #[error("profile not found")]
    ProfileNotFound,

    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if matches!(error, Error::ColumnDecode { .. }) {
            return Self::InvalidData;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PricingError> for OrdersServiceError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::UnknownMenuItem(item) => Self::MenuItemNotFound(item),
            other => Self::InvalidOrder(other),
        }
    }
}

impl From<SettlementError> for OrdersServiceError {
    fn from(error: SettlementError) -> Self {
        match error {
            SettlementError::InsufficientBalance => Self::InsufficientBalance,
            SettlementError::InsufficientPoints => Self::InsufficientPoints,
            SettlementError::Overflow => Self::InvalidOrder(PricingError::Overflow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_menu_item_maps_to_menu_item_not_found() {
        let item = MenuItemUuid::new();

        let error = OrdersServiceError::from(PricingError::UnknownMenuItem(item));

        assert!(
            matches!(error, OrdersServiceError::MenuItemNotFound(found) if found == item),
            "expected MenuItemNotFound, got {error:?}"
        );
    }

    #[test]
    fn settlement_overflow_is_an_invalid_order() {
        let error = OrdersServiceError::from(SettlementError::Overflow);

        assert!(
            matches!(error, OrdersServiceError::InvalidOrder(PricingError::Overflow)),
            "expected InvalidOrder, got {error:?}"
        );
    }
}
