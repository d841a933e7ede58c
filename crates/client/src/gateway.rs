//! Mode controller: the sole public surface of the data-access core.
//!
//! Per call it serves from the local store (demo mode), from the remote
//! service, or from the remote service with an explicit local fallback
//! stage on read failures. Mutating calls never fall back outside demo
//! mode: a failed PUT or upload may have had partial remote effect, and
//! silently diverging local state would mask it.

use api_types::receipt::{ItemsReplace, LineItem, LineItemDraft, Receipt};
use api_types::stats::{CategoryTotals, SpendingEntry};
use engine::{JsonFilePersistence, ReceiptStore};
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{GatewayError, Result};
use crate::remote::RemoteClient;
use crate::routes::{LocalRouter, Route};

enum Mode {
    Demo,
    Remote(RemoteClient),
}

pub struct Gateway {
    mode: Mode,
    local: LocalRouter,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.mode {
            Mode::Demo => "Demo",
            Mode::Remote(_) => "Remote",
        };
        f.debug_struct("Gateway").field("mode", &mode).finish_non_exhaustive()
    }
}

impl Gateway {
    /// Return a builder for `Gateway`.
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    /// Builds a gateway from resolved configuration, with the file-backed
    /// local slot at the configured path.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Gateway::builder()
            .demo_mode(config.demo_enabled())
            .base_url(&config.base_url)
            .store(ReceiptStore::new(Box::new(JsonFilePersistence::new(
                &config.state_path,
            ))))
            .build()
    }

    /// Serves a GET-shaped logical request.
    ///
    /// Remote mode runs two visible stages: the remote attempt, then a local
    /// re-dispatch that happens only on a transport failure and only when
    /// the path maps to a known endpoint. When the local table has no
    /// matching pattern either, the original remote failure is re-raised.
    pub async fn read(&self, path: &str) -> Result<Value> {
        let route = Route::parse(path);

        let remote = match &self.mode {
            Mode::Demo => {
                let route = route.ok_or_else(|| GatewayError::UnknownRoute(path.to_string()))?;
                return self.local.get(route);
            }
            Mode::Remote(remote) => remote,
        };

        match remote.get(path).await {
            Ok(value) => Ok(value),
            Err(remote_err) => match route {
                Some(route) => {
                    tracing::warn!(path, error = %remote_err, "remote read failed, serving local data");
                    match self.local.get(route) {
                        Err(GatewayError::UnknownRoute(_)) => Err(remote_err.into()),
                        served => served,
                    }
                }
                None => Err(remote_err.into()),
            },
        }
    }

    /// Serves the items-replace request. No fallback outside demo mode.
    pub async fn write(&self, path: &str, payload: &Value) -> Result<Value> {
        match &self.mode {
            Mode::Demo => {
                let route =
                    Route::parse(path).ok_or_else(|| GatewayError::UnknownRoute(path.to_string()))?;
                self.local.put(route, payload)
            }
            Mode::Remote(remote) => Ok(remote.put_json(path, payload).await?),
        }
    }

    /// Serves the multipart upload request. No fallback outside demo mode;
    /// in demo mode the bytes are ignored and the local store synthesizes
    /// its placeholder receipt.
    pub async fn upload(&self, path: &str, file_name: &str, bytes: Vec<u8>) -> Result<Value> {
        match &self.mode {
            Mode::Demo => {
                let route =
                    Route::parse(path).ok_or_else(|| GatewayError::UnknownRoute(path.to_string()))?;
                self.local.post_form(route)
            }
            Mode::Remote(remote) => {
                let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
                let form = reqwest::multipart::Form::new().part("file", part);
                Ok(remote.post_form(path, form).await?)
            }
        }
    }

    pub async fn list_receipts(&self) -> Result<Vec<Receipt>> {
        let value = self.read(&Route::ListReceipts.path()).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_receipt(&self, id: i64) -> Result<Option<Receipt>> {
        let value = self.read(&Route::Receipt { id }.path()).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn receipt_items(&self, receipt_id: i64) -> Result<Vec<LineItem>> {
        let value = self.read(&Route::ReceiptItems { receipt_id }.path()).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Replaces a receipt's items wholesale; `None` when the receipt does
    /// not exist.
    pub async fn replace_items(
        &self,
        receipt_id: i64,
        items: Vec<LineItemDraft>,
    ) -> Result<Option<Vec<LineItem>>> {
        let payload = serde_json::to_value(ItemsReplace { items })?;
        let value = self
            .write(&Route::ReceiptItems { receipt_id }.path(), &payload)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn upload_receipt(&self, file_name: &str, bytes: Vec<u8>) -> Result<Receipt> {
        let value = self
            .upload(&Route::UploadReceipt.path(), file_name, bytes)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn spending_by_item(&self) -> Result<Vec<SpendingEntry>> {
        let value = self.read(&Route::SpendingByItem.path()).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn category_totals(&self) -> Result<CategoryTotals> {
        let value = self.read(&Route::CategoryTotals.path()).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Clears the local slot; the next local read re-seeds.
    pub fn reset_local(&self) -> Result<()> {
        Ok(self.local.store().reset()?)
    }

    /// Direct handle on the local store, for local-only tooling (export,
    /// diagnostics).
    pub fn local_store(&self) -> &ReceiptStore {
        self.local.store()
    }
}

/// The builder for `Gateway`.
#[derive(Default)]
pub struct GatewayBuilder {
    demo_mode: bool,
    base_url: String,
    store: Option<ReceiptStore>,
}

impl GatewayBuilder {
    pub fn demo_mode(mut self, enabled: bool) -> Self {
        self.demo_mode = enabled;
        self
    }

    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn store(mut self, store: ReceiptStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<Gateway> {
        let store = self
            .store
            .ok_or_else(|| GatewayError::InvalidConfig("missing local store".to_string()))?;

        let mode = if self.demo_mode {
            Mode::Demo
        } else {
            let base_url = self.base_url.trim();
            if base_url.is_empty() {
                return Err(GatewayError::InvalidConfig(
                    "base_url is required unless demo mode is enabled".to_string(),
                ));
            }
            Mode::Remote(RemoteClient::new(base_url.to_string()))
        };

        Ok(Gateway {
            mode,
            local: LocalRouter::new(store),
        })
    }
}
