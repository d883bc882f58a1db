// src/services/storage_service.rs
//
// Image upload and removal in the object store.
//
// CRITICAL RULES:
// - Object names never reuse the caller's file name, only its extension
// - Uploads never overwrite an existing object
// - A URL outside the image bucket is rejected before any remote call

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};

use crate::backend::{ObjectStore, UploadOptions};
use crate::domain::{
    generate_object_name, object_path_from_url, validate_folder, ImageFile, DEFAULT_IMAGE_FOLDER,
};
use crate::error::AppResult;

pub struct StorageService {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl StorageService {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload an image under `folder` (default `general`) and return its public URL
    pub async fn upload_image(&self, file: ImageFile, folder: Option<&str>) -> AppResult<String> {
        let folder = folder.unwrap_or(DEFAULT_IMAGE_FOLDER);
        validate_folder(folder)?;

        let extension = file.extension()?;
        let name = generate_object_name(extension, &mut rand::thread_rng(), Utc::now());
        let path = format!("{}/{}", folder, name);
        let options = UploadOptions::new(file.content_type());

        self.store
            .upload(&self.bucket, &path, file.bytes, &options)
            .await?;
        info!("Uploaded image {} to bucket {}", path, self.bucket);

        Ok(self.store.public_url(&self.bucket, &path))
    }

    /// Remove the object a previously returned public URL points at
    pub async fn delete_image(&self, url: &str) -> AppResult<bool> {
        let path = match object_path_from_url(url, &self.bucket) {
            Ok(path) => path,
            Err(e) => {
                warn!("Refused to delete image: {}", e);
                return Err(e);
            }
        };

        self.store.remove(&self.bucket, &[path.clone()]).await?;
        info!("Deleted image {} from bucket {}", path, self.bucket);
        Ok(true)
    }
}
