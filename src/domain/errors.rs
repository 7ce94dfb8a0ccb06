use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No order has been calculated in this session")]
    NotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to load inventory file: {status}")]
    FetchFailed { status: u16 },
    #[error("Inventory source unreachable: {0}")]
    SourceUnreachable(String),
    #[error("Invalid inventory document: {0}")]
    InventoryParse(#[from] serde_json::Error),
    #[error("Uploaded file is not UTF-8 text: {0}")]
    UploadRead(#[from] std::string::FromUtf8Error),
    #[error("Cart line references product {index}, which is not in the inventory")]
    MissingProduct { index: usize },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
