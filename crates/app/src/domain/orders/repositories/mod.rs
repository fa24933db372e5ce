//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{OrderItemRow, PgOrderItemsRepository};
pub(crate) use orders::{OrderRow, PgOrdersRepository};
