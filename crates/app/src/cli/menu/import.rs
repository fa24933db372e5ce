use std::{fs, path::PathBuf};

use cafe_app::{
    database::{self, Db},
    domain::menu::{
        MenuService, MenuServiceError, PgMenuService, data::NewMenuItem, records::MenuItemUuid,
    },
};
use clap::Args;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ImportMenuArgs {
    /// YAML file listing the menu items
    #[arg(long)]
    file: PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

/// Menu Fixture
#[derive(Debug, Deserialize)]
struct MenuFixture {
    items: Vec<MenuFixtureItem>,
}

#[derive(Debug, Deserialize)]
struct MenuFixtureItem {
    /// Generated when omitted
    id: Option<Uuid>,
    name: String,
    category: String,

    /// Minor units
    price: u64,

    #[serde(default)]
    reward_points: u64,
}

impl From<MenuFixtureItem> for NewMenuItem {
    fn from(item: MenuFixtureItem) -> Self {
        Self {
            uuid: item.id.map_or_else(MenuItemUuid::new, MenuItemUuid::from_uuid),
            name: item.name,
            price: item.price,
            category: item.category,
            reward_points: item.reward_points,
        }
    }
}

fn parse_menu(yaml: &str) -> Result<Vec<NewMenuItem>, serde_norway::Error> {
    let fixture: MenuFixture = serde_norway::from_str(yaml)?;

    Ok(fixture.items.into_iter().map(NewMenuItem::from).collect())
}

pub(crate) async fn run(args: ImportMenuArgs) -> Result<(), String> {
    let contents = fs::read_to_string(&args.file)
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let items = parse_menu(&contents)
        .map_err(|error| format!("failed to parse {}: {error}", args.file.display()))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgMenuService::new(Db::new(pool));

    let mut created = 0_usize;
    let mut skipped = 0_usize;

    for item in items {
        let uuid = item.uuid;
        let name = item.name.clone();

        match service.create_menu_item(item).await {
            Ok(record) => {
                created += 1;
                println!("created {} ({})", record.name, record.uuid);
            }
            Err(MenuServiceError::AlreadyExists) => {
                skipped += 1;
                println!("skipped {name} ({uuid}): already exists");
            }
            Err(error) => return Err(format!("failed to create {name}: {error}")),
        }
    }

    println!("imported {created} menu items, skipped {skipped}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixture_parses() -> Result<(), serde_norway::Error> {
        let items = parse_menu(include_str!("../../../fixtures/menu.yaml"))?;

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].name, "Espresso");
        assert_eq!(
            items[0].uuid.to_string(),
            "0190f1c2-7a3e-7c41-9d1a-3f2b6a0c1e01"
        );
        assert_eq!(items[1].price, 350);
        assert_eq!(items[3].category, "Bakery");

        Ok(())
    }

    #[test]
    fn reward_points_default_to_zero() -> Result<(), serde_norway::Error> {
        let items = parse_menu("items:\n  - name: Water\n    category: Drinks\n    price: 0\n")?;

        assert_eq!(items[0].reward_points, 0);

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = parse_menu("items:\n  - name: Refund\n    category: Drinks\n    price: -5\n");

        assert!(result.is_err());
    }
}
