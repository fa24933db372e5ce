//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{encode_amount, try_get_amount},
    domain::{
        menu::records::MenuItemUuid,
        orders::{
            pricing::PricedLine,
            records::{OrderItemRecord, OrderItemUuid, OrderUuid},
        },
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

/// An order item tagged with the order it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct OrderItemRow {
    pub order_uuid: OrderUuid,
    pub item: OrderItemRecord,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        position: usize,
        line: &PricedLine,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        let uuid = OrderItemUuid::new();

        query(CREATE_ORDER_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(line.menu_item.into_uuid())
            .bind(encode_count("position", position)?)
            .bind(encode_count("quantity", line.quantity)?)
            .bind(encode_amount("unit_price", line.unit_price)?)
            .bind(encode_amount("unit_reward_points", line.unit_reward_points)?)
            .execute(&mut **tx)
            .await?;

        Ok(OrderItemRecord {
            uuid,
            menu_item_uuid: line.menu_item,
            name: line.name.clone(),
            category: line.category.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            unit_reward_points: line.unit_reward_points,
        })
    }

    /// Load the items of several orders, each order's items in cart order.
    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRow>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, OrderItemRow>(LIST_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

fn encode_count<T>(column: &str, value: T) -> Result<i32, sqlx::Error>
where
    i32: TryFrom<T, Error = std::num::TryFromIntError>,
{
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            item: OrderItemRecord {
                uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
                menu_item_uuid: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
                name: row.try_get("name")?,
                category: row.try_get("category")?,
                quantity,
                unit_price: try_get_amount(row, "unit_price")?,
                unit_reward_points: try_get_amount(row, "unit_reward_points")?,
            },
        })
    }
}
