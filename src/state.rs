use crate::application::storefront_service::StorefrontService;
use crate::domain::ports::RecordStore;
use crate::infrastructure::inventory_source::HttpInventorySource;

pub type BoxedStore = Box<dyn RecordStore>;

/// Everything the handlers need, shared across actix workers.
pub struct AppState {
    pub storefront: StorefrontService<BoxedStore, BoxedStore>,
    pub inventory_source: HttpInventorySource,
    /// Path used by `POST /inventory/load` when the request names none.
    pub inventory_path: String,
}

impl AppState {
    pub fn new(
        durable: impl RecordStore,
        session: impl RecordStore,
        inventory_source: HttpInventorySource,
        inventory_path: impl Into<String>,
    ) -> Self {
        let durable: BoxedStore = Box::new(durable);
        let session: BoxedStore = Box::new(session);
        Self {
            storefront: StorefrontService::new(durable, session),
            inventory_source,
            inventory_path: inventory_path.into(),
        }
    }
}
