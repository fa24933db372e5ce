//! Order Records

use jiff::Timestamp;

use crate::{auth::UserRecord, domain::menu::records::MenuItemUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
///
/// Immutable once placed. Amounts are in minor units and were priced from the
/// catalog at the moment of placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user: UserRecord,
    pub items: Vec<OrderItemRecord>,
    pub total_price: u64,
    pub reward_points_earned: u64,
    pub reward_points_redeemed: u64,
    pub net_charge: u64,
    pub created_at: Timestamp,
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub menu_item_uuid: MenuItemUuid,
    pub name: String,
    pub category: String,
    pub quantity: u32,

    /// Catalog price per unit when the order was placed.
    pub unit_price: u64,

    pub unit_reward_points: u64,
}
