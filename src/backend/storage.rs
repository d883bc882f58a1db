// src/backend/storage.rs
//
// Object store client for the hosted storage API.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{header, Client};
use serde_json::json;

use crate::backend::gateway::{ObjectStore, UploadOptions};
use crate::backend::rest::{authorize, build_http_client, send};
use crate::config::BackendConfig;
use crate::error::AppResult;

pub struct RestObjectStore {
    storage_url: String,
    api_key: String,
    http_client: Client,
}

impl RestObjectStore {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        Ok(Self {
            storage_url: config.storage_url(),
            api_key: config.api_key.clone(),
            http_client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl ObjectStore for RestObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> AppResult<()> {
        let url = format!("{}/object/{}/{}", self.storage_url, bucket, path);
        debug!("Uploading {} bytes to {}/{}", bytes.len(), bucket, path);

        let request = authorize(self.http_client.post(url), &self.api_key)
            .header(header::CONTENT_TYPE, options.content_type.as_str())
            .header(
                header::CACHE_CONTROL,
                format!("max-age={}", options.cache_control_secs),
            )
            .header("x-upsert", options.upsert.to_string())
            .body(bytes);

        send(request).await?;
        info!("Stored object {}/{}", bucket, path);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.storage_url, bucket, path)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> AppResult<()> {
        let url = format!("{}/object/{}", self.storage_url, bucket);
        debug!("Removing {:?} from {}", paths, bucket);

        let request = authorize(self.http_client.delete(url), &self.api_key)
            .json(&json!({ "prefixes": paths }));

        send(request).await?;
        info!("Removed {} object(s) from {}", paths.len(), bucket);
        Ok(())
    }
}
