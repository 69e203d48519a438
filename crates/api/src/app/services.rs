use std::sync::Arc;

use fleetreg_infra::FleetStore;

/// State shared by every handler, constructed once at startup.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn FleetStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn FleetStore {
        self.store.as_ref()
    }
}
