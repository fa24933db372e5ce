//! Order Data

use crate::domain::{menu::records::MenuItemUuid, orders::records::OrderUuid};

/// A cart submitted for placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub lines: Vec<NewOrderLine>,
    pub reward_points_redeemed: u64,
}

/// One cart line. Prices are never taken from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub menu_item: MenuItemUuid,
    pub quantity: u32,
}
