//! State

use std::sync::Arc;

use attar_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Accept `X-User-Id` in place of a bearer token.
    pub(crate) direct_login_enabled: bool,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, direct_login_enabled: bool) -> Arc<Self> {
        Arc::new(Self {
            app,
            direct_login_enabled,
        })
    }
}
