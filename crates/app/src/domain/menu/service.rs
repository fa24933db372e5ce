//! Menu service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::menu::{
        data::{MenuItemUpdate, NewMenuItem},
        errors::MenuServiceError,
        records::{MenuItemRecord, MenuItemUuid},
        repository::PgMenuRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgMenuService {
    db: Db,
    repository: PgMenuRepository,
}

impl PgMenuService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgMenuRepository::new(),
        }
    }
}

#[async_trait]
impl MenuService for PgMenuService {
    async fn list_menu_items(&self) -> Result<Vec<MenuItemRecord>, MenuServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.repository.list_menu_items(&mut tx).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_menu_item(&self, item: MenuItemUuid) -> Result<MenuItemRecord, MenuServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let item = self.repository.get_menu_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> Result<MenuItemRecord, MenuServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_menu_item(&mut tx, &item).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_menu_item(
        &self,
        item: MenuItemUuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItemRecord, MenuServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_menu_item(&mut tx, item, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_menu_item(&self, item: MenuItemUuid) -> Result<(), MenuServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_menu_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(MenuServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait MenuService: Send + Sync {
    /// Retrieves every live menu item, grouped by category.
    async fn list_menu_items(&self) -> Result<Vec<MenuItemRecord>, MenuServiceError>;

    /// Retrieve a single live menu item.
    async fn get_menu_item(&self, item: MenuItemUuid) -> Result<MenuItemRecord, MenuServiceError>;

    /// Adds an item to the menu.
    async fn create_menu_item(&self, item: NewMenuItem)
    -> Result<MenuItemRecord, MenuServiceError>;

    /// Replaces the name, price, category and reward points of an item.
    async fn update_menu_item(
        &self,
        item: MenuItemUuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItemRecord, MenuServiceError>;

    /// Removes an item from the menu. Past orders keep referring to it.
    async fn delete_menu_item(&self, item: MenuItemUuid) -> Result<(), MenuServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_menu_item};

    use super::*;

    #[tokio::test]
    async fn create_menu_item_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = MenuItemUuid::new();

        let item = ctx
            .menu
            .create_menu_item(new_menu_item(uuid, "Flat White", 350, 35))
            .await?;

        assert_eq!(item.uuid, uuid);
        assert_eq!(item.name, "Flat White");
        assert_eq!(item.price, 350);
        assert_eq!(item.category, "Coffee");
        assert_eq!(item.reward_points, 35);
        assert!(item.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_menu_item_returns_created_item() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = MenuItemUuid::new();

        ctx.menu
            .create_menu_item(new_menu_item(uuid, "Latte", 400, 40))
            .await?;

        let item = ctx.menu.get_menu_item(uuid).await?;

        assert_eq!(item.uuid, uuid);
        assert_eq!(item.price, 400);

        Ok(())
    }

    #[tokio::test]
    async fn get_menu_item_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.menu.get_menu_item(MenuItemUuid::new()).await;

        assert!(
            matches!(result, Err(MenuServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_menu_items_orders_by_category_then_name() -> TestResult {
        let ctx = TestContext::new().await;

        let mut muffin = new_menu_item(MenuItemUuid::new(), "Muffin", 250, 25);
        muffin.category = "Bakery".to_string();

        ctx.menu
            .create_menu_item(new_menu_item(MenuItemUuid::new(), "Mocha", 420, 42))
            .await?;
        ctx.menu
            .create_menu_item(new_menu_item(MenuItemUuid::new(), "Americano", 300, 30))
            .await?;
        ctx.menu.create_menu_item(muffin).await?;

        let names: Vec<String> = ctx
            .menu
            .list_menu_items()
            .await?
            .into_iter()
            .map(|item| item.name)
            .collect();

        assert_eq!(names, ["Muffin", "Americano", "Mocha"]);

        Ok(())
    }

    #[tokio::test]
    async fn create_menu_item_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = MenuItemUuid::new();

        ctx.menu
            .create_menu_item(new_menu_item(uuid, "Espresso", 250, 25))
            .await?;

        let result = ctx
            .menu
            .create_menu_item(new_menu_item(uuid, "Espresso", 250, 25))
            .await;

        assert!(
            matches!(result, Err(MenuServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_menu_item_blank_name_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .menu
            .create_menu_item(new_menu_item(MenuItemUuid::new(), "   ", 250, 25))
            .await;

        assert!(
            matches!(result, Err(MenuServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_menu_item_replaces_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = MenuItemUuid::new();

        ctx.menu
            .create_menu_item(new_menu_item(uuid, "Tea", 200, 20))
            .await?;

        let updated = ctx
            .menu
            .update_menu_item(
                uuid,
                MenuItemUpdate {
                    name: "Chai Latte".to_string(),
                    price: 380,
                    category: "Tea".to_string(),
                    reward_points: 38,
                },
            )
            .await?;

        assert_eq!(updated.uuid, uuid);
        assert_eq!(updated.name, "Chai Latte");
        assert_eq!(updated.price, 380);
        assert_eq!(updated.category, "Tea");
        assert_eq!(updated.reward_points, 38);

        Ok(())
    }

    #[tokio::test]
    async fn update_menu_item_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .menu
            .update_menu_item(
                MenuItemUuid::new(),
                MenuItemUpdate {
                    name: "Ghost".to_string(),
                    price: 100,
                    category: "Coffee".to_string(),
                    reward_points: 0,
                },
            )
            .await;

        assert!(
            matches!(result, Err(MenuServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_menu_item_hides_it_from_catalog() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = MenuItemUuid::new();

        ctx.menu
            .create_menu_item(new_menu_item(uuid, "Cortado", 320, 32))
            .await?;

        ctx.menu.delete_menu_item(uuid).await?;

        let result = ctx.menu.get_menu_item(uuid).await;
        let items = ctx.menu.list_menu_items().await?;

        assert!(
            matches!(result, Err(MenuServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );
        assert!(
            !items.iter().any(|item| item.uuid == uuid),
            "deleted item should not appear in the menu"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_menu_item_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = MenuItemUuid::new();

        ctx.menu
            .create_menu_item(new_menu_item(uuid, "Macchiato", 300, 30))
            .await?;

        ctx.menu.delete_menu_item(uuid).await?;

        let result = ctx.menu.delete_menu_item(uuid).await;

        assert!(
            matches!(result, Err(MenuServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
