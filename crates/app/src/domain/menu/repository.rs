//! Menu Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{encode_amount, try_get_amount},
    domain::menu::{
        data::{MenuItemUpdate, NewMenuItem},
        records::{MenuItemRecord, MenuItemUuid},
    },
};

const LIST_MENU_ITEMS_SQL: &str = include_str!("sql/list_menu_items.sql");
const GET_MENU_ITEM_SQL: &str = include_str!("sql/get_menu_item.sql");
const SHARE_MENU_ITEMS_SQL: &str = include_str!("sql/share_menu_items.sql");
const CREATE_MENU_ITEM_SQL: &str = include_str!("sql/create_menu_item.sql");
const UPDATE_MENU_ITEM_SQL: &str = include_str!("sql/update_menu_item.sql");
const DELETE_MENU_ITEM_SQL: &str = include_str!("sql/delete_menu_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgMenuRepository;

impl PgMenuRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_menu_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<MenuItemRecord>, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(LIST_MENU_ITEMS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(GET_MENU_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Load live menu items and hold a share lock on them until the transaction ends.
    ///
    /// Unknown or deleted identifiers are simply absent from the result.
    pub(crate) async fn share_menu_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[MenuItemUuid],
    ) -> Result<Vec<MenuItemRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = items.iter().map(|item| item.into_uuid()).collect();

        query_as::<Postgres, MenuItemRecord>(SHARE_MENU_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &NewMenuItem,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(CREATE_MENU_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(&item.name)
            .bind(encode_amount("price", item.price)?)
            .bind(&item.category)
            .bind(encode_amount("reward_points", item.reward_points)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
        update: &MenuItemUpdate,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(UPDATE_MENU_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(&update.name)
            .bind(encode_amount("price", update.price)?)
            .bind(&update.category)
            .bind(encode_amount("reward_points", update.reward_points)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_MENU_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for MenuItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MenuItemUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            category: row.try_get("category")?,
            reward_points: try_get_amount(row, "reward_points")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
