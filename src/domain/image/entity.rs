use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::{AppError, AppResult};

/// Folder used when the caller does not pick one
pub const DEFAULT_IMAGE_FOLDER: &str = "general";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_PART_LEN: usize = 13;

/// An image about to be uploaded to the object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name as chosen by the user (`choir.JPG`)
    pub name: String,
    pub bytes: Vec<u8>,
    /// Explicit MIME type; guessed from the extension when absent
    pub content_type: Option<String>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Extension of the user's file name, required for naming the stored object
    pub fn extension(&self) -> AppResult<&str> {
        file_extension(&self.name).ok_or_else(|| {
            AppError::InvalidInput(format!("Image file '{}' has no extension", self.name))
        })
    }

    pub fn content_type(&self) -> String {
        match (&self.content_type, file_extension(&self.name)) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(ext)) => content_type_for(ext).to_string(),
            (None, None) => "application/octet-stream".to_string(),
        }
    }
}

/// Text after the last `.` of a file name, if there is any
pub fn file_extension(name: &str) -> Option<&str> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Collision-resistant object name: `<13 random base36>_<unix millis>.<ext>`
pub fn generate_object_name<R: Rng + ?Sized>(
    extension: &str,
    rng: &mut R,
    now: DateTime<Utc>,
) -> String {
    let random: String = (0..RANDOM_PART_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!("{}_{}.{}", random, now.timestamp_millis(), extension)
}

pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
