//! JSON document sources.
//!
//! The generator never knows where its documents live. Everything is fetched
//! through a [`DataSource`] by a path relative to the data root:
//!
//! | Source | Backing | Use |
//! |--------|---------|-----|
//! | [`FileSource`] | `tokio::fs` under a root directory | local data packs |
//! | [`HttpSource`] | `reqwest` against a base URL | hosted data |
//! | [`MemorySource`] | in-memory map | tests, embedding |
//!
//! CRITICAL: Uses `tokio::fs` for all file I/O to avoid blocking the async runtime.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::fs;

use super::errors::{SourceError, SourceResult};

// ============================================================================
// Document Paths
// ============================================================================

/// Locations of the input documents, relative to the data root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentPaths {
    pub features: String,
    pub locations: String,
    pub archetypes: String,
    pub blocklist: String,
    pub homebrew_index: String,
    /// Directory that `homebrew_index` entries are relative to.
    pub homebrew_dir: String,
    pub races: String,
}

impl Default for DocumentPaths {
    fn default() -> Self {
        Self {
            features: "features.json".to_string(),
            locations: "locations.json".to_string(),
            archetypes: "archetypes.json".to_string(),
            blocklist: "homebrew/content-blocklist.json".to_string(),
            homebrew_index: "homebrew/index.json".to_string(),
            homebrew_dir: "homebrew".to_string(),
            races: "data/races.json".to_string(),
        }
    }
}

impl DocumentPaths {
    /// Path of a file listed in the homebrew index.
    pub fn homebrew_file(&self, file: &str) -> String {
        if self.homebrew_dir.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", self.homebrew_dir.trim_end_matches('/'), file)
        }
    }
}

// ============================================================================
// DataSource Trait
// ============================================================================

/// Supplies raw JSON documents by relative path.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable description for logs ("files under /srv/data").
    fn describe(&self) -> String;

    /// Fetch the raw text of a document.
    async fn fetch_text(&self, path: &str) -> SourceResult<String>;
}

/// Fetch and decode a JSON document.
pub async fn fetch_json<T: DeserializeOwned>(
    source: &(impl DataSource + ?Sized),
    path: &str,
) -> SourceResult<T> {
    let text = source.fetch_text(path).await?;
    serde_json::from_str(&text).map_err(|e| SourceError::parse_failed(path, e))
}

// ============================================================================
// FileSource
// ============================================================================

/// Reads documents from a directory tree.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn describe(&self) -> String {
        format!("files under {}", self.root.display())
    }

    async fn fetch_text(&self, path: &str) -> SourceResult<String> {
        let full = self.root.join(path);
        fs::read_to_string(&full).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::not_found(path)
            } else {
                SourceError::read_failed(path, e)
            }
        })
    }
}

// ============================================================================
// HttpSource
// ============================================================================

/// Fetches documents relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: reqwest::Url,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source for `base_url`. A trailing slash is added so relative
    /// paths resolve beneath it.
    pub fn new(base_url: &str) -> SourceResult<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = reqwest::Url::parse(&normalized)
            .map_err(|e| SourceError::transport(base_url, None, e.to_string()))?;

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        format!("HTTP at {}", self.base_url)
    }

    async fn fetch_text(&self, path: &str) -> SourceResult<String> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| SourceError::transport(path, None, e.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::transport(path, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::transport(
                path,
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("request failed"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::transport(path, Some(status.as_u16()), e.to_string()))
    }
}

// ============================================================================
// MemorySource
// ============================================================================

/// Serves documents from memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, path: &str, text: impl Into<String>) -> Self {
        self.documents.insert(path.to_string(), text.into());
        self
    }

    pub fn with_json(self, path: &str, value: &serde_json::Value) -> Self {
        self.with_text(path, value.to_string())
    }
}

#[async_trait]
impl DataSource for MemorySource {
    fn describe(&self) -> String {
        format!("{} in-memory documents", self.documents.len())
    }

    async fn fetch_text(&self, path: &str) -> SourceResult<String> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::not_found(path))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use tokio::fs::File;
    use tokio::io::AsyncWriteExt;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Index {
        #[serde(rename = "toImport")]
        to_import: Vec<String>,
    }

    async fn create_temp_file(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.unwrap();
        }
        let mut file = File::create(&path).await.unwrap();
        file.write_all(content.as_bytes()).await.unwrap();
    }

    #[test]
    fn test_homebrew_file_path() {
        let mut paths = DocumentPaths::default();
        assert_eq!(paths.homebrew_file("kobolds.json"), "homebrew/kobolds.json");

        paths.homebrew_dir = "brew/".to_string();
        assert_eq!(paths.homebrew_file("kobolds.json"), "brew/kobolds.json");

        paths.homebrew_dir = String::new();
        assert_eq!(paths.homebrew_file("kobolds.json"), "kobolds.json");
    }

    #[tokio::test]
    async fn test_file_source_reads_nested_paths() {
        let temp = TempDir::new().unwrap();
        create_temp_file(&temp, "homebrew/index.json", r#"{ "toImport": ["a.json"] }"#).await;

        let source = FileSource::new(temp.path());
        let index: Index = fetch_json(&source, "homebrew/index.json").await.unwrap();
        assert_eq!(index.to_import, vec!["a.json"]);
    }

    #[tokio::test]
    async fn test_file_source_not_found() {
        let temp = TempDir::new().unwrap();
        let source = FileSource::new(temp.path());
        let result: SourceResult<Index> = fetch_json(&source, "missing.json").await;
        assert!(matches!(result, Err(SourceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_file_source_parse_error() {
        let temp = TempDir::new().unwrap();
        create_temp_file(&temp, "broken.json", "{ broken").await;

        let source = FileSource::new(temp.path());
        let result: SourceResult<Index> = fetch_json(&source, "broken.json").await;
        assert!(matches!(result, Err(SourceError::ParseFailed { .. })));
    }

    #[tokio::test]
    async fn test_http_source_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/data/homebrew/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "toImport": ["x.json"] })))
            .mount(&server)
            .await;

        let source = HttpSource::new(&format!("{}/data", server.uri())).unwrap();
        let index: Index = fetch_json(&source, "homebrew/index.json").await.unwrap();
        assert_eq!(index.to_import, vec!["x.json"]);
    }

    #[tokio::test]
    async fn test_http_source_non_success_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/data/races.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpSource::new(&server.uri()).unwrap();
        let result = source.fetch_text("data/races.json").await;
        assert!(matches!(
            result,
            Err(SourceError::Transport { status: Some(404), .. })
        ));
    }

    #[test]
    fn test_http_source_rejects_bad_url() {
        assert!(HttpSource::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_memory_source() {
        let source = MemorySource::new().with_json("a.json", &json!({ "toImport": [] }));
        let index: Index = fetch_json(&source, "a.json").await.unwrap();
        assert!(index.to_import.is_empty());
        assert!(matches!(
            source.fetch_text("b.json").await,
            Err(SourceError::NotFound { .. })
        ));
    }
}
