//! Shared handler state.

use std::sync::Arc;

use storefront_app::context::AppContext;

/// The application services every handler works against, injected into
/// requests by the affix-state middleware.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn shared(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
