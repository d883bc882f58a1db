use reqwest::Url;

use crate::error::{AppError, AppResult};

/// Folders are relative object-store prefixes: no empty, `.` or `..` segments
pub fn validate_folder(folder: &str) -> AppResult<()> {
    if folder.is_empty() {
        return Err(AppError::InvalidInput("Image folder cannot be empty".to_string()));
    }

    let bad_segment = folder
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if bad_segment {
        return Err(AppError::InvalidInput(format!(
            "Invalid image folder '{}'",
            folder
        )));
    }
    Ok(())
}

/// Object path inside `bucket` referenced by a public image URL.
///
/// `https://x.supabase.co/storage/v1/object/public/images/general/a.png`
/// yields `general/a.png` for bucket `images`. The object path starts after
/// the `object/public/<bucket>` run of segments; URLs of another shape fall
/// back to the first segment equal to the bucket name. Segments are
/// percent-decoded so the path matches the name the object was stored under.
pub fn object_path_from_url(url: &str, bucket: &str) -> AppResult<String> {
    let parsed = Url::parse(url)
        .map_err(|e| AppError::InvalidInput(format!("Invalid image URL '{}': {}", url, e)))?;

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.collect())
        .unwrap_or_default();

    let start = segments
        .windows(3)
        .position(|w| w[0] == "object" && w[1] == "public" && w[2] == bucket)
        .map(|i| i + 3)
        .or_else(|| {
            segments
                .iter()
                .position(|segment| *segment == bucket)
                .map(|i| i + 1)
        })
        .ok_or_else(|| {
            AppError::InvalidInput(format!("Image URL '{}' is not in bucket '{}'", url, bucket))
        })?;

    let mut decoded = Vec::new();
    for segment in segments[start..].iter().filter(|segment| !segment.is_empty()) {
        let segment = urlencoding::decode(segment).map_err(|e| {
            AppError::InvalidInput(format!("Image URL '{}' is not valid UTF-8: {}", url, e))
        })?;
        decoded.push(segment.into_owned());
    }

    let path = decoded.join("/");
    if path.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Image URL '{}' does not name an object",
            url
        )));
    }
    Ok(path)
}
