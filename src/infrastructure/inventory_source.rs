use reqwest::header::CACHE_CONTROL;
use reqwest::{Client, Url};

use crate::domain::errors::DomainError;
use crate::domain::ports::InventorySource;

/// Fetches inventory documents over HTTP.
///
/// Relative paths are resolved against `base_url`; absolute `http(s)` URLs are
/// used as given.
#[derive(Debug, Clone)]
pub struct HttpInventorySource {
    client: Client,
    base_url: Option<Url>,
}

impl HttpInventorySource {
    pub fn new(base_url: Option<Url>) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn resolve(&self, path: &str) -> Result<Url, DomainError> {
        if let Ok(url) = Url::parse(path) {
            return match url.scheme() {
                "http" | "https" => Ok(url),
                other => Err(DomainError::InvalidInput(format!(
                    "unsupported inventory URL scheme '{other}'"
                ))),
            };
        }

        let base = self.base_url.as_ref().ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "cannot resolve relative inventory path '{path}' without INVENTORY_BASE_URL"
            ))
        })?;
        base.join(path)
            .map_err(|e| DomainError::InvalidInput(format!("invalid inventory path '{path}': {e}")))
    }
}

impl InventorySource for HttpInventorySource {
    async fn fetch(&self, path: &str) -> Result<String, DomainError> {
        let url = self.resolve(path)?;
        log::info!("Fetching inventory from {}", url);

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| DomainError::SourceUnreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::FetchFailed {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::SourceUnreachable(e.to_string()))
    }
}
