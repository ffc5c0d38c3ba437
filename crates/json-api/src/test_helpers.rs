//! Test helpers.

use std::sync::Arc;

use attar_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        addresses::MockAddressesService,
        carts::MockCartsService,
        orders::MockOrdersService,
        products::MockProductsService,
        profiles::{MockProfilesService, records::ProfileUuid, records::Role},
        tracking::MockTrackingService,
    },
    health::MockHealthService,
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: ProfileUuid = ProfileUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_TIMESTAMP: Timestamp = Timestamp::UNIX_EPOCH;

pub(crate) const CUSTOMER: Principal = Principal {
    user_uuid: TEST_USER_UUID,
    role: Role::Customer,
};

pub(crate) const ADMIN: Principal = Principal {
    user_uuid: TEST_USER_UUID,
    role: Role::Admin,
};

/// Builds a [`State`] whose services are mocks with no expectations unless supplied,
/// so any unexpected call fails the test.
#[derive(Default)]
pub(crate) struct TestState {
    auth: Option<MockAuthService>,
    products: Option<MockProductsService>,
    carts: Option<MockCartsService>,
    addresses: Option<MockAddressesService>,
    orders: Option<MockOrdersService>,
    tracking: Option<MockTrackingService>,
    health: Option<MockHealthService>,
    direct_login_enabled: bool,
}

impl TestState {
    pub(crate) fn with_auth(mut self, auth: MockAuthService) -> Self {
        self.auth = Some(auth);
        self
    }

    pub(crate) fn with_products(mut self, products: MockProductsService) -> Self {
        self.products = Some(products);
        self
    }

    pub(crate) fn with_carts(mut self, carts: MockCartsService) -> Self {
        self.carts = Some(carts);
        self
    }

    pub(crate) fn with_addresses(mut self, addresses: MockAddressesService) -> Self {
        self.addresses = Some(addresses);
        self
    }

    pub(crate) fn with_orders(mut self, orders: MockOrdersService) -> Self {
        self.orders = Some(orders);
        self
    }

    pub(crate) fn with_tracking(mut self, tracking: MockTrackingService) -> Self {
        self.tracking = Some(tracking);
        self
    }

    pub(crate) fn with_health(mut self, health: MockHealthService) -> Self {
        self.health = Some(health);
        self
    }

    pub(crate) fn with_direct_login(mut self, enabled: bool) -> Self {
        self.direct_login_enabled = enabled;
        self
    }

    pub(crate) fn build(self) -> Arc<State> {
        State::new(
            AppContext {
                profiles: Arc::new(MockProfilesService::new()),
                products: Arc::new(self.products.unwrap_or_default()),
                carts: Arc::new(self.carts.unwrap_or_default()),
                addresses: Arc::new(self.addresses.unwrap_or_default()),
                orders: Arc::new(self.orders.unwrap_or_default()),
                tracking: Arc::new(self.tracking.unwrap_or_default()),
                auth: Arc::new(self.auth.unwrap_or_default()),
                health: Arc::new(self.health.unwrap_or_default()),
            },
            self.direct_login_enabled,
        )
    }

    /// Mount `route` behind the state and a fixed principal, skipping token checks.
    pub(crate) fn service(self, principal: Principal, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.build()))
                .hoop(inject_principal(principal))
                .push(route),
        )
    }

    /// Mount `route` behind the state with no principal, as for public routes.
    pub(crate) fn anonymous_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.build())).push(route))
    }
}

struct InjectPrincipal(Principal);

#[async_trait]
impl Handler for InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

fn inject_principal(principal: Principal) -> InjectPrincipal {
    InjectPrincipal(principal)
}
