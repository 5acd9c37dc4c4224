//! State

use std::sync::Arc;

use bazaar_app::context::AppContext;

use crate::{admin, media::MediaUrls};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Builds absolute image links for product responses.
    pub(crate) media: MediaUrls,

    /// SHA-256 hex digest of the admin bearer token.
    pub(crate) admin_token_hash: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, media: MediaUrls, admin_token: &str) -> Self {
        Self {
            app,
            media,
            admin_token_hash: admin::hash_token(admin_token),
        }
    }

    #[must_use]
    pub(crate) fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
