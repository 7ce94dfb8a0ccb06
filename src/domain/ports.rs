use std::future::Future;

use super::errors::DomainError;

/// Key/value storage for serialized records.
///
/// Values are opaque text; `set` replaces whatever was stored under `key`.
pub trait RecordStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}

impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        (**self).set(key, value)
    }
}

/// Somewhere an inventory document can be fetched from by path.
pub trait InventorySource {
    /// Fetch the raw document. A non-success response is reported as
    /// [`DomainError::FetchFailed`] with its status code.
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, DomainError>> + Send;
}
