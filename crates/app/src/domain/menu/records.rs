//! Menu Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Menu Item UUID
pub type MenuItemUuid = TypedUuid<MenuItemRecord>;

/// Menu Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemRecord {
    pub uuid: MenuItemUuid,
    pub name: String,

    /// Unit price in pence/cents.
    pub price: u64,

    pub category: String,

    /// Points earned for each unit purchased.
    pub reward_points: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
