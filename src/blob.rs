//! Static item uploads
//!
//! Pushes JSON item descriptions to blob storage, one object per item, keyed
//! by the item's name. Returns the public URL of every uploaded object.

use crate::logger::SeedLogger;
use crate::{log_if_verbose, Result, SeedError};
use deunicode::deunicode;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Destination for JSON objects
#[allow(async_fn_in_trait)]
pub trait BlobStore {
    /// Store `payload` under `key` and return its public URL
    async fn put_json(&self, key: &str, payload: &Value) -> Result<String>;
}

/// Object key for an item name
///
/// Case is kept: "Basic Attack" -> "Basic_Attack", "Hero's Fireball!" -> "Heros_Fireball".
pub fn blob_key(name: &str) -> Result<String> {
    let key: String = deunicode(name.trim())
        .chars()
        .filter_map(|c| match c {
            ' ' | '-' | '_' => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '.' => Some(c),
            _ => None,
        })
        .collect();

    let key = key.trim_matches(|c: char| c == '_' || c == '.').to_string();
    if key.is_empty() {
        return Err(SeedError::malformed("name", name, "no usable characters for a key"));
    }
    Ok(key)
}

/// Blob store backed by a local directory
#[derive(Debug, Clone)]
pub struct DirectoryBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl DirectoryBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        DirectoryBlobStore {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn public_url(&self, key: &str) -> String {
        if self.public_base_url.is_empty() || self.public_base_url.ends_with('/') {
            format!("{}{key}", self.public_base_url)
        } else {
            format!("{}/{key}", self.public_base_url)
        }
    }
}

impl BlobStore for DirectoryBlobStore {
    async fn put_json(&self, key: &str, payload: &Value) -> Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;
        let body = serde_json::to_vec_pretty(payload)?;
        tokio::fs::write(self.root.join(key), body).await?;
        Ok(self.public_url(key))
    }
}

/// What happened to one item
#[derive(Debug)]
pub enum UploadOutcome {
    Uploaded { name: String, url: String },
    /// Item had no usable name and was not sent
    Skipped { index: usize, error: SeedError },
    Failed { name: String, error: SeedError },
}

impl UploadOutcome {
    pub fn url(&self) -> Option<&str> {
        match self {
            UploadOutcome::Uploaded { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Upload every item in order; failures are logged and do not stop the run
///
/// An item whose key an earlier item in the run already uploaded under is
/// skipped, so one object never overwrites another.
pub async fn upload_items<B: BlobStore>(
    blobs: &B,
    items: &[Value],
    logger: &SeedLogger,
) -> Vec<UploadOutcome> {
    let mut outcomes = Vec::with_capacity(items.len());
    let mut claimed: FxHashMap<String, &str> = FxHashMap::default();

    for (index, item) in items.iter().enumerate() {
        let key = match item.get("name").and_then(Value::as_str) {
            Some(name) => blob_key(name).and_then(|key| match claimed.get(&key) {
                Some(earlier) => Err(SeedError::malformed(
                    "name",
                    name,
                    format!("key {key} is already used by {earlier}"),
                )),
                None => Ok((name, key)),
            }),
            None => Err(SeedError::malformed("name", "", "item has no string name")),
        };

        let (name, key) = match key {
            Ok(pair) => pair,
            Err(error) => {
                logger.warn("upload", &format!("Skipping item {index}: {error}"));
                outcomes.push(UploadOutcome::Skipped { index, error });
                continue;
            }
        };

        match blobs.put_json(&key, item).await {
            Ok(url) => {
                logger.normal("upload", &format!("File uploaded successfully. {url}"));
                log_if_verbose!(logger, "upload", "{name} stored under key {key}");
                claimed.insert(key, name);
                outcomes.push(UploadOutcome::Uploaded {
                    name: name.to_string(),
                    url,
                });
            }
            Err(error) => {
                logger.error("upload", &format!("Error uploading {name}: {error}"));
                outcomes.push(UploadOutcome::Failed {
                    name: name.to_string(),
                    error,
                });
            }
        }
    }

    outcomes
}

/// Read items from a JSON file holding an array or a single object
pub async fn load_items(path: &Path) -> Result<Vec<Value>> {
    let content = tokio::fs::read_to_string(path).await?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Array(items) => Ok(items),
        item @ Value::Object(_) => Ok(vec![item]),
        other => Err(SeedError::ParseError(format!(
            "{}: expected an item or an array of items, found {other}",
            path.display()
        ))),
    }
}
