//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::{
    auth::UserUuid,
    database::Db,
    domain::{
        menu::{records::MenuItemUuid, repository::PgMenuRepository},
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            pricing::{authorize, merge_lines, quote},
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            repositories::{OrderItemRow, PgOrderItemsRepository, PgOrdersRepository},
        },
        profiles::{
            data::NewLedgerEntry,
            records::{LedgerEntryKind, LedgerEntryUuid},
            repository::PgProfilesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    menu: PgMenuRepository,
    profiles: PgProfilesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            menu: PgMenuRepository::new(),
            profiles: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let lines = merge_lines(&order.lines)?;

        let mut tx = self.db.begin_transaction().await?;

        let profile = self
            .profiles
            .lock_profile_for_user(&mut tx, user)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => OrdersServiceError::ProfileNotFound,
                other => other.into(),
            })?;

        let wanted: Vec<MenuItemUuid> = lines.iter().map(|line| line.menu_item).collect();
        let catalog = self.menu.share_menu_items(&mut tx, &wanted).await?;

        let quote = quote(&lines, &catalog, order.reward_points_redeemed)?;
        let settlement = authorize(profile.balance, profile.reward_points, &quote)?;

        let created_at = self
            .orders
            .create_order(&mut tx, order.uuid, user, &quote)
            .await?;

        let mut items = Vec::with_capacity(quote.lines.len());

        for (position, line) in quote.lines.iter().enumerate() {
            items.push(
                self.items
                    .create_order_item(&mut tx, order.uuid, position, line)
                    .await?,
            );
        }

        let updated = self
            .profiles
            .set_balances(
                &mut tx,
                profile.uuid,
                settlement.balance_after,
                settlement.points_after,
            )
            .await?;

        self.profiles
            .create_ledger_entry(
                &mut tx,
                &NewLedgerEntry {
                    uuid: LedgerEntryUuid::new(),
                    profile: profile.uuid,
                    kind: LedgerEntryKind::OrderPlaced,
                    balance_delta: settlement.balance_delta,
                    points_delta: settlement.points_delta,
                    balance_after: updated.balance,
                    points_after: updated.reward_points,
                    order: Some(order.uuid),
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            order = %order.uuid,
            user = %user,
            total_price = quote.total_price,
            net_charge = quote.net_charge,
            reward_points_earned = quote.reward_points_earned,
            reward_points_redeemed = quote.reward_points_redeemed,
            "placed order"
        );

        Ok(OrderRecord {
            uuid: order.uuid,
            user: updated.user,
            items,
            total_price: quote.total_price,
            reward_points_earned: quote.reward_points_earned,
            reward_points_redeemed: quote.reward_points_redeemed,
            net_charge: quote.net_charge,
            created_at,
        })
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows = self.orders.list_orders(&mut tx, user).await?;

        let uuids: Vec<OrderUuid> = rows.iter().map(|row| row.uuid).collect();
        let item_rows = self.items.list_order_items(&mut tx, &uuids).await?;

        tx.commit().await?;

        let mut items = group_items(item_rows);

        Ok(rows
            .into_iter()
            .map(|row| {
                let order_items = items.remove(&row.uuid).unwrap_or_default();

                row.into_record(order_items)
            })
            .collect())
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let row = self.orders.get_order(&mut tx, user, order).await?;
        let item_rows = self.items.list_order_items(&mut tx, &[order]).await?;

        tx.commit().await?;

        let items = item_rows.into_iter().map(|row| row.item).collect();

        Ok(row.into_record(items))
    }
}

fn group_items(rows: Vec<OrderItemRow>) -> FxHashMap<OrderUuid, Vec<OrderItemRecord>> {
    let mut grouped: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

    for row in rows {
        grouped.entry(row.order_uuid).or_default().push(row.item);
    }

    grouped
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Price a cart from the catalog and charge it to the user's profile.
    ///
    /// The whole read-validate-write sequence runs in one transaction holding
    /// the profile row lock, so a rejected order writes nothing and concurrent
    /// orders on one profile apply one after another.
    async fn place_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve the user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieve one of the user's orders.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::UserRecord,
        domain::{
            menu::MenuService,
            orders::{data::NewOrderLine, pricing::PricingError},
            profiles::ProfilesService,
        },
        test::{
            TestContext,
            helpers::{new_menu_item, register_user},
        },
    };

    use super::*;

    fn cart(lines: &[(MenuItemUuid, u32)], redeemed: u64) -> NewOrder {
        NewOrder {
            uuid: OrderUuid::new(),
            lines: lines
                .iter()
                .map(|&(menu_item, quantity)| NewOrderLine {
                    menu_item,
                    quantity,
                })
                .collect(),
            reward_points_redeemed: redeemed,
        }
    }

    async fn funded_user(ctx: &TestContext, name: &str, amount: i64) -> TestResult<UserRecord> {
        let user = register_user(ctx, name).await?;
        let profile = ctx.profiles.get_profile_for_user(user.uuid).await?;

        ctx.profiles.add_funds(profile.uuid, amount).await?;

        Ok(user)
    }

    async fn menu_item(
        ctx: &TestContext,
        name: &str,
        price: u64,
        reward_points: u64,
    ) -> TestResult<MenuItemUuid> {
        let uuid = MenuItemUuid::new();

        ctx.menu
            .create_menu_item(new_menu_item(uuid, name, price, reward_points))
            .await?;

        Ok(uuid)
    }

    #[tokio::test]
    async fn place_order_prices_from_catalog_and_charges_profile() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 5_000).await?;
        let latte = menu_item(&ctx, "Latte", 320, 3).await?;
        let scone = menu_item(&ctx, "Scone", 275, 2).await?;

        let order = ctx
            .orders
            .place_order(user.uuid, cart(&[(latte, 2), (scone, 1)], 0))
            .await?;

        assert_eq!(order.total_price, 2 * 320 + 275);
        assert_eq!(order.reward_points_earned, 2 * 3 + 2);
        assert_eq!(order.net_charge, order.total_price);
        assert_eq!(order.user.uuid, user.uuid);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].menu_item_uuid, latte);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[1].name, "Scone");

        let profile = ctx.profiles.get_profile_for_user(user.uuid).await?;

        assert_eq!(profile.balance, 5_000 - 915);
        assert_eq!(profile.reward_points, 8);

        Ok(())
    }

    #[tokio::test]
    async fn redeemed_points_reduce_the_charge() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 5_000).await?;
        let mocha = menu_item(&ctx, "Mocha", 1_000, 10).await?;

        ctx.orders
            .place_order(user.uuid, cart(&[(mocha, 1)], 0))
            .await?;

        let order = ctx
            .orders
            .place_order(user.uuid, cart(&[(mocha, 2)], 4))
            .await?;

        assert_eq!(order.total_price, 2_000);
        assert_eq!(order.net_charge, 1_800);

        let profile = ctx.profiles.get_profile_for_user(user.uuid).await?;

        assert_eq!(profile.balance, 5_000 - 1_000 - 1_800);
        assert_eq!(profile.reward_points, 10 - 4 + 20);

        let ledger = ctx.profiles.list_ledger_entries(profile.uuid).await?;

        assert_eq!(ledger[0].kind, LedgerEntryKind::OrderPlaced);
        assert_eq!(ledger[0].order_uuid, Some(order.uuid));
        assert_eq!(ledger[0].balance_delta, -1_800);
        assert_eq!(ledger[0].points_delta, 16);

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_balance_writes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 300).await?;
        let latte = menu_item(&ctx, "Latte", 320, 3).await?;

        let result = ctx
            .orders
            .place_order(user.uuid, cart(&[(latte, 1)], 0))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InsufficientBalance)),
            "expected InsufficientBalance, got {result:?}"
        );

        let profile = ctx.profiles.get_profile_for_user(user.uuid).await?;

        assert_eq!(profile.balance, 300);
        assert_eq!(profile.reward_points, 0);
        assert!(ctx.orders.list_orders(user.uuid).await?.is_empty());
        assert_eq!(ctx.profiles.list_ledger_entries(profile.uuid).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_points_writes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 1_000).await?;
        let latte = menu_item(&ctx, "Latte", 320, 3).await?;

        let result = ctx
            .orders
            .place_order(user.uuid, cart(&[(latte, 1)], 2))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InsufficientPoints)),
            "expected InsufficientPoints, got {result:?}"
        );

        let profile = ctx.profiles.get_profile_for_user(user.uuid).await?;

        assert_eq!(profile.balance, 1_000);
        assert!(ctx.orders.list_orders(user.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_menu_item_is_reported() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 1_000).await?;
        let missing = MenuItemUuid::new();

        let result = ctx
            .orders
            .place_order(user.uuid, cart(&[(missing, 1)], 0))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::MenuItemNotFound(item)) if item == missing),
            "expected MenuItemNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_menu_item_cannot_be_ordered() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 1_000).await?;
        let latte = menu_item(&ctx, "Latte", 320, 3).await?;

        ctx.menu.delete_menu_item(latte).await?;

        let result = ctx
            .orders
            .place_order(user.uuid, cart(&[(latte, 1)], 0))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::MenuItemNotFound(_))),
            "expected MenuItemNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 1_000).await?;

        let result = ctx.orders.place_order(user.uuid, cart(&[], 0)).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidOrder(PricingError::EmptyOrder))
            ),
            "expected InvalidOrder, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn quantity_beyond_storable_range_is_invalid_without_writing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 1_000).await?;
        let water = menu_item(&ctx, "Tap Water", 0, 0).await?;

        let result = ctx
            .orders
            .place_order(user.uuid, cart(&[(water, i32::MAX.unsigned_abs() + 1)], 0))
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidOrder(PricingError::QuantityTooLarge(item))) if item == water
            ),
            "expected QuantityTooLarge, got {result:?}"
        );

        assert!(ctx.orders.list_orders(user.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn repeated_items_are_merged_into_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 5_000).await?;
        let latte = menu_item(&ctx, "Latte", 320, 3).await?;

        let order = ctx
            .orders
            .place_order(user.uuid, cart(&[(latte, 1), (latte, 2)], 0))
            .await?;

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 3);
        assert_eq!(order.total_price, 960);

        Ok(())
    }

    #[tokio::test]
    async fn orders_are_scoped_to_their_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = funded_user(&ctx, "alice", 5_000).await?;
        let bob = funded_user(&ctx, "bob", 5_000).await?;
        let latte = menu_item(&ctx, "Latte", 320, 3).await?;

        let order = ctx
            .orders
            .place_order(alice.uuid, cart(&[(latte, 1)], 0))
            .await?;

        let fetched = ctx.orders.get_order(alice.uuid, order.uuid).await?;
        assert_eq!(fetched, order);

        let result = ctx.orders.get_order(bob.uuid, order.uuid).await;
        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        assert!(ctx.orders.list_orders(bob.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_returns_newest_first_with_items() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 5_000).await?;
        let latte = menu_item(&ctx, "Latte", 320, 3).await?;
        let scone = menu_item(&ctx, "Scone", 275, 2).await?;

        let first = ctx
            .orders
            .place_order(user.uuid, cart(&[(latte, 1)], 0))
            .await?;
        let second = ctx
            .orders
            .place_order(user.uuid, cart(&[(scone, 2), (latte, 1)], 0))
            .await?;

        let orders = ctx.orders.list_orders(user.uuid).await?;

        assert_eq!(orders, vec![second, first]);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_orders_cannot_overdraw_balance() -> TestResult {
        let ctx = TestContext::new().await;
        let user = funded_user(&ctx, "alice", 1_000).await?;
        let mocha = menu_item(&ctx, "Mocha", 600, 6).await?;

        let (first, second) = tokio::join!(
            ctx.orders.place_order(user.uuid, cart(&[(mocha, 1)], 0)),
            ctx.orders.place_order(user.uuid, cart(&[(mocha, 1)], 0)),
        );

        let placed = [&first, &second]
            .iter()
            .filter(|result| result.is_ok())
            .count();
        let rejected = [&first, &second]
            .iter()
            .filter(|result| matches!(result, Err(OrdersServiceError::InsufficientBalance)))
            .count();

        assert_eq!((placed, rejected), (1, 1));

        let profile = ctx.profiles.get_profile_for_user(user.uuid).await?;

        assert_eq!(profile.balance, 400);
        assert_eq!(profile.reward_points, 6);

        Ok(())
    }
}
