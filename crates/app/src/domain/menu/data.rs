//! Menu Data

use crate::domain::menu::records::MenuItemUuid;

/// New Menu Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    pub uuid: MenuItemUuid,
    pub name: String,
    pub price: u64,
    pub category: String,
    pub reward_points: u64,
}

/// Menu Item Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemUpdate {
    pub name: String,
    pub price: u64,
    pub category: String,
    pub reward_points: u64,
}
