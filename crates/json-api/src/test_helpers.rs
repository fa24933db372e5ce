//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use cafe_app::{
    auth::{AuthenticatedSession, MockAuthService, SessionUuid, UserRecord, UserUuid},
    context::AppContext,
    domain::{
        menu::{
            MockMenuService,
            records::{MenuItemRecord, MenuItemUuid},
        },
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
        profiles::{
            MockProfilesService,
            records::{ProfileRecord, ProfileUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const TEST_SESSION_UUID: SessionUuid = SessionUuid::from_uuid(Uuid::from_u128(2));

#[salvo::handler]
pub(crate) async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session(AuthenticatedSession {
        user: TEST_USER_UUID,
        session: TEST_SESSION_UUID,
    });

    ctrl.call_next(req, depot, res).await;
}

/// Service mocks for one test. Anything left at its default fails the test if called.
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub menu: MockMenuService,
    pub orders: MockOrdersService,
    pub profiles: MockProfilesService,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            auth: MockAuthService::new(),
            menu: MockMenuService::new(),
            orders: MockOrdersService::new(),
            profiles: MockProfilesService::new(),
        }
    }
}

impl std::fmt::Debug for Mocks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mocks").finish_non_exhaustive()
    }
}

impl Mocks {
    pub(crate) fn state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            menu: Arc::new(self.menu),
            orders: Arc::new(self.orders),
            profiles: Arc::new(self.profiles),
        })
    }

    /// Serve `route` as if the request was authenticated as [`TEST_USER_UUID`].
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.state()))
                .hoop(inject_session)
                .push(route),
        )
    }

    /// Serve `route` without any session.
    pub(crate) fn anonymous_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.state())).push(route))
    }
}

pub(crate) fn make_user(uuid: UserUuid, username: &str) -> UserRecord {
    UserRecord {
        uuid,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_menu_item(uuid: MenuItemUuid) -> MenuItemRecord {
    MenuItemRecord {
        uuid,
        name: "Flat White".to_string(),
        price: 350,
        category: "Coffee".to_string(),
        reward_points: 2,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_profile(uuid: ProfileUuid, balance: i64) -> ProfileRecord {
    ProfileRecord {
        uuid,
        user: make_user(TEST_USER_UUID, "alice"),
        balance,
        reward_points: 10,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Two flat whites with four points redeemed.
pub(crate) fn make_order(uuid: OrderUuid, menu_item: MenuItemUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user: make_user(TEST_USER_UUID, "alice"),
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            menu_item_uuid: menu_item,
            name: "Flat White".to_string(),
            category: "Coffee".to_string(),
            quantity: 2,
            unit_price: 350,
            unit_reward_points: 2,
        }],
        total_price: 700,
        reward_points_earned: 4,
        reward_points_redeemed: 4,
        net_charge: 500,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
