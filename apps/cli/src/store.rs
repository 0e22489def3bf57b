//! Saved endpoint list, kept as a JSON array on disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use upcheck::Endpoint;
use url::Url;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("{path} is not a valid endpoint list: {source}")]
    Malformed { path: PathBuf, source: serde_json::Error },

    #[error("Failed to serialize endpoint list: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Missing,
}

/// Insertion-ordered list of saved endpoints
#[derive(Debug)]
pub struct EndpointStore {
    path: PathBuf,
    endpoints: Vec<Endpoint>,
}

impl EndpointStore {
    /// Load the list at `path`. A missing file is an empty list.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self { path, endpoints: Vec::new() });
        }

        let raw = fs::read_to_string(&path)
            .map_err(|source| StoreError::Read { path: path.clone(), source })?;
        let endpoints = if raw.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&raw)
                .map_err(|source| StoreError::Malformed { path: path.clone(), source })?
        };

        Ok(Self { path, endpoints })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn find(&self, url: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.url == url)
    }

    /// Append an endpoint unless its url is already saved
    pub fn add(&mut self, url: &str, name: Option<String>) -> Result<AddOutcome, StoreError> {
        validate_url(url)?;

        if self.find(url).is_some() {
            return Ok(AddOutcome::Duplicate);
        }

        self.endpoints.push(Endpoint::new(url, name));
        Ok(AddOutcome::Added)
    }

    pub fn remove(&mut self, url: &str) -> RemoveOutcome {
        let before = self.endpoints.len();
        self.endpoints.retain(|endpoint| endpoint.url != url);

        if self.endpoints.len() == before { RemoveOutcome::Missing } else { RemoveOutcome::Removed }
    }

    /// Single-endpoint input for an ad-hoc url, named after its saved record if any
    pub fn resolve(&self, url: &str) -> Endpoint {
        match self.find(url) {
            Some(saved) => saved.clone(),
            None => Endpoint::from_url(url),
        }
    }

    /// Write the list back, creating parent directories as needed
    pub fn save(&self) -> Result<(), StoreError> {
        let mut contents = serde_json::to_string_pretty(&self.endpoints)?;
        contents.push('\n');

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| StoreError::Write { path: self.path.clone(), source })?;
        }

        fs::write(&self.path, contents)
            .map_err(|source| StoreError::Write { path: self.path.clone(), source })
    }
}

/// Only absolute http(s) urls are saved
fn validate_url(url: &str) -> Result<(), StoreError> {
    let invalid = |reason: String| StoreError::InvalidUrl { url: url.to_string(), reason };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = EndpointStore::open(dir.path().join("upcheck.json")).unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn test_add_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/upcheck.json");

        let mut store = EndpointStore::open(&path).unwrap();
        assert_eq!(store.add("https://api.test", Some("api".to_string())).unwrap(), AddOutcome::Added);
        assert_eq!(store.add("https://web.test", None).unwrap(), AddOutcome::Added);
        store.save().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with('\n'));

        let reloaded = EndpointStore::open(&path).unwrap();
        assert_eq!(
            reloaded.endpoints(),
            &[
                Endpoint::new("https://api.test", Some("api".to_string())),
                Endpoint::new("https://web.test", Some("https://web.test".to_string())),
            ]
        );
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let dir = tempdir().unwrap();
        let mut store = EndpointStore::open(dir.path().join("upcheck.json")).unwrap();

        store.add("https://api.test", None).unwrap();
        let outcome = store.add("https://api.test", Some("again".to_string())).unwrap();

        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(store.endpoints().len(), 1);
        assert_eq!(store.endpoints()[0].name, "https://api.test");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let dir = tempdir().unwrap();
        let mut store = EndpointStore::open(dir.path().join("upcheck.json")).unwrap();

        assert!(matches!(store.add("not a url", None), Err(StoreError::InvalidUrl { .. })));
        assert!(matches!(store.add("ftp://files.test", None), Err(StoreError::InvalidUrl { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let mut store = EndpointStore::open(dir.path().join("upcheck.json")).unwrap();
        store.add("https://api.test", None).unwrap();

        assert_eq!(store.remove("https://other.test"), RemoveOutcome::Missing);
        assert_eq!(store.remove("https://api.test"), RemoveOutcome::Removed);
        assert!(store.is_empty());
    }

    #[test]
    fn test_resolve_uses_saved_name() {
        let dir = tempdir().unwrap();
        let mut store = EndpointStore::open(dir.path().join("upcheck.json")).unwrap();
        store.add("https://api.test", Some("api".to_string())).unwrap();

        assert_eq!(store.resolve("https://api.test").name, "api");
        assert_eq!(store.resolve("https://adhoc.test"), Endpoint::from_url("https://adhoc.test"));
    }

    #[test]
    fn test_records_without_name_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("upcheck.json");
        fs::write(&path, r#"[{"url": "https://api.test"}]"#).unwrap();

        let store = EndpointStore::open(&path).unwrap();
        assert_eq!(store.endpoints()[0].name, "https://api.test");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("upcheck.json");
        fs::write(&path, r#"{"url": "https://api.test"}"#).unwrap();

        assert!(matches!(EndpointStore::open(&path), Err(StoreError::Malformed { .. })));
    }
}
