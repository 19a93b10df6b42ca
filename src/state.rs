use std::sync::Arc;

use axum::extract::FromRef;

use crate::{processor::PaymentProcessor, services::auth_service::TokenKeys, store::StudioStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudioStore>,
    pub payments: Arc<dyn PaymentProcessor>,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn StudioStore>,
        payments: Arc<dyn PaymentProcessor>,
        tokens: TokenKeys,
    ) -> Self {
        Self {
            store,
            payments,
            tokens: Arc::new(tokens),
        }
    }
}

impl FromRef<AppState> for Arc<TokenKeys> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
