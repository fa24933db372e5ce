//! Test Helpers

use crate::{
    auth::{AuthService, AuthServiceError, NewRegistration, UserRecord},
    domain::menu::{data::NewMenuItem, records::MenuItemUuid},
    test::TestContext,
};

pub(crate) const TEST_PASSWORD: &str = "correct horse battery staple";

pub(crate) fn registration(username: &str) -> NewRegistration {
    NewRegistration {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: TEST_PASSWORD.to_string(),
    }
}

pub(crate) async fn register_user(
    ctx: &TestContext,
    username: &str,
) -> Result<UserRecord, AuthServiceError> {
    ctx.auth.register(registration(username)).await
}

pub(crate) fn new_menu_item(
    uuid: MenuItemUuid,
    name: &str,
    price: u64,
    reward_points: u64,
) -> NewMenuItem {
    NewMenuItem {
        uuid,
        name: name.to_string(),
        price,
        category: "Coffee".to_string(),
        reward_points,
    }
}
