// Reading definition/log sources from local paths or file:// urls

use anyhow::Result;
use procmodel_base::error::ProcessModelError;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use url::Url;

/// Check if a string looks like a Windows drive path (e.g., "C:\path" or "D:/path")
fn is_windows_path(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

/// Resolve a local path or `file://` url to a filesystem path.
pub fn resolve_path(url_or_path: &str) -> Result<PathBuf> {
    if is_windows_path(url_or_path) {
        return Ok(PathBuf::from(url_or_path));
    }
    match url_or_path.parse::<Url>() {
        Ok(url) => match url.scheme() {
            "file" => url.to_file_path().map_err(|_| {
                ProcessModelError::InvalidParameter(format!("Invalid file URL path: {}", url))
                    .into()
            }),
            scheme => Err(ProcessModelError::InvalidParameter(format!(
                "unsupported source scheme '{}' (only local paths and file:// urls): {}",
                scheme, url
            ))
            .into()),
        },
        // not an absolute url: plain (relative or absolute) path
        Err(_) => Ok(PathBuf::from(url_or_path)),
    }
}

pub fn check_source_size(len: usize, max_source_bytes: usize) -> Result<()> {
    if len > max_source_bytes {
        Err(ProcessModelError::InvalidParameter(format!(
            "source too large: {} bytes (max: {} bytes)",
            len, max_source_bytes
        ))
        .into())
    } else {
        Ok(())
    }
}

/// Decode json, falling back to yaml.
/// The reported error follows the apparent format of the data.
pub fn decode_json_or_yaml<T: DeserializeOwned>(data: &str) -> Result<T> {
    match serde_json::from_str::<T>(data) {
        Ok(v) => Ok(v),
        Err(json_err) => serde_yaml::from_str::<T>(data).map_err(|yaml_err| {
            let trimmed = data.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                tracing::debug!("yaml decode error: {}", yaml_err);
                ProcessModelError::from(json_err).into()
            } else {
                tracing::debug!("json decode error: {}", json_err);
                ProcessModelError::from(yaml_err).into()
            }
        }),
    }
}

pub trait UseLoadUrlOrPath {
    fn max_source_bytes(&self) -> usize;

    fn load_url_or_path<T: DeserializeOwned>(
        &self,
        url_or_path: &str,
    ) -> impl std::future::Future<Output = Result<T>> + Send {
        let max_source_bytes = self.max_source_bytes();
        let path = resolve_path(url_or_path);
        async move {
            let path = path?;
            let file = tokio::fs::File::open(&path)
                .await
                .map_err(ProcessModelError::IoError)?;
            // file metadata can report 0 (pipes, /proc), so the limit is enforced on read
            let mut buf = Vec::new();
            file.take((max_source_bytes as u64).saturating_add(1))
                .read_to_end(&mut buf)
                .await
                .map_err(ProcessModelError::IoError)?;
            check_source_size(buf.len(), max_source_bytes)?;
            let body = String::from_utf8(buf).map_err(|e| {
                ProcessModelError::InvalidParameter(format!(
                    "source is not valid utf-8: {}: {}",
                    path.display(),
                    e
                ))
            })?;
            tracing::debug!("loaded {} bytes from {}", body.len(), path.display());
            decode_json_or_yaml(&body)
        }
    }
}
