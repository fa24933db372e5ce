//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::{UserRecord, UserUuid, repository::joined_user},
    database::{encode_amount, try_get_amount},
    domain::orders::{
        pricing::Quote,
        records::{OrderItemRecord, OrderRecord, OrderUuid},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");

/// An order without its items.
#[derive(Debug, Clone)]
pub(crate) struct OrderRow {
    pub uuid: OrderUuid,
    pub user: UserRecord,
    pub total_price: u64,
    pub reward_points_earned: u64,
    pub reward_points_redeemed: u64,
    pub net_charge: u64,
    pub created_at: Timestamp,
}

impl OrderRow {
    pub(crate) fn into_record(self, items: Vec<OrderItemRecord>) -> OrderRecord {
        OrderRecord {
            uuid: self.uuid,
            user: self.user,
            items,
            total_price: self.total_price,
            reward_points_earned: self.reward_points_earned,
            reward_points_redeemed: self.reward_points_redeemed,
            net_charge: self.net_charge,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order header and return its creation time.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        quote: &Quote,
    ) -> Result<Timestamp, sqlx::Error> {
        let row = query(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(encode_amount("total_price", quote.total_price)?)
            .bind(encode_amount("reward_points_earned", quote.reward_points_earned)?)
            .bind(encode_amount("reward_points_redeemed", quote.reward_points_redeemed)?)
            .bind(encode_amount("net_charge", quote.net_charge)?)
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff())
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRow>, sqlx::Error> {
        query_as::<Postgres, OrderRow>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRow, sqlx::Error> {
        query_as::<Postgres, OrderRow>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user: joined_user(row)?,
            total_price: try_get_amount(row, "total_price")?,
            reward_points_earned: try_get_amount(row, "reward_points_earned")?,
            reward_points_redeemed: try_get_amount(row, "reward_points_redeemed")?,
            net_charge: try_get_amount(row, "net_charge")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
