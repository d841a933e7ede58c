//! Generic transport to the remote receipt service.

use reqwest::multipart::Form;
use serde::Serialize;
use serde_json::Value;

use crate::error::RemoteError;

/// Thin wrapper over HTTP: GET, PUT-JSON, and POST-form against a fixed
/// base URL. Success means a success status; anything else becomes a typed
/// error carrying the response body text. No timeouts beyond the
/// transport's own defaults.
#[derive(Clone, Debug)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode(response: reqwest::Response) -> Result<Value, RemoteError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = if body.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                body
            };
            return Err(RemoteError::Status { status, message });
        }

        serde_json::from_str(&body).map_err(RemoteError::Decode)
    }

    pub async fn get(&self, path: &str) -> Result<Value, RemoteError> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Value, RemoteError> {
        let response = self.http.put(self.url(path)).json(payload).send().await?;
        Self::decode(response).await
    }

    pub async fn post_form(&self, path: &str, form: Form) -> Result<Value, RemoteError> {
        let response = self.http.post(self.url(path)).multipart(form).send().await?;
        Self::decode(response).await
    }
}
