use axum::async_trait;
use reqwest::{
    Client,
    RequestBuilder,
    StatusCode,
    Url,
};
use serde_json::Value;

use super::BlobStore;
use crate::error::StoreError;

/// Blob store reached over HTTP.
///
/// Each blob lives at `<base>/<store name>/<key>`: `GET` returns the JSON document or 404, `PUT`
/// with a JSON body replaces it.
#[derive(Clone, Debug)]
pub struct RemoteStore {
    client: Client,
    base_url: Url,
    store_name: String,
    token: Option<String>,
}

impl RemoteStore {
    pub fn new(base_url: Url, store_name: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            store_name: store_name.to_string(),
            token,
        }
    }

    fn blob_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.store_name,
            key
        )
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

#[async_trait]
impl BlobStore for RemoteStore {
    async fn get_json(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let resp = self
            .authorize(self.client.get(self.blob_url(key)))
            .send()
            .await?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(resp.json::<Value>().await?)),
            status => Err(StoreError::Status {
                key: key.to_string(),
                status: status.as_u16(),
            }),
        }
    }

    async fn set_json(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let resp = self
            .authorize(self.client.put(self.blob_url(key)))
            .json(value)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(StoreError::Status {
                key: key.to_string(),
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }
}
