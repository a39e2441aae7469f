use std::sync::Arc;

use crate::{config::AppConfig, payments::PaymentProvider, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub payments: Arc<dyn PaymentProvider>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        payments: Arc<dyn PaymentProvider>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            payments,
            config: Arc::new(config),
        }
    }
}
