// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file key-value store adapter.
//!
//! This module provides a persistent store that keeps its values in a YAML
//! file, writing the whole file through on every change.

use crate::domain::{Result, StoreError, StoreKey, StoreValue};
use crate::ports::{KeyValueStore, StoreFormat};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Maximum allowed file size for YAML store files (10MB)
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SOURCE_NAME: &str = "yaml-file";

/// YAML format implementation.
///
/// The file is a single mapping from key to a `{type, value}` pair:
///
/// ```yaml
/// retryCount:
///   type: integer
///   value: 5
/// endpoint:
///   type: url
///   value: https://example.com/
/// ```
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::YamlFormat;
/// use hexstore::domain::StoreValue;
/// use hexstore::ports::StoreFormat;
///
/// let format = YamlFormat::new();
/// let values = format.parse("retryCount:\n  type: integer\n  value: 5\n").unwrap();
/// assert_eq!(values.get("retryCount"), Some(&StoreValue::Integer(5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlFormat;

impl YamlFormat {
    /// Creates a new YAML format.
    pub fn new() -> Self {
        YamlFormat
    }
}

impl StoreFormat for YamlFormat {
    fn parse(&self, content: &str) -> Result<BTreeMap<String, StoreValue>> {
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let values: Option<BTreeMap<String, StoreValue>> =
            serde_yaml::from_str(content).map_err(|e| StoreError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(values.unwrap_or_default())
    }

    fn render(&self, values: &BTreeMap<String, StoreValue>) -> Result<String> {
        serde_yaml::to_string(values).map_err(|e| StoreError::ParseError {
            message: format!("Failed to render YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Persistent key-value store backed by a YAML file.
///
/// The file is read once when the store is opened and again on
/// [`reload`](KeyValueStore::reload). Every write replaces the file through a
/// temporary sibling, so a crash mid-write leaves the previous contents in
/// place. A missing file is treated as an empty store and created on the first
/// write.
///
/// # Examples
///
/// ```rust,no_run
/// use hexstore::adapters::YamlFileStore;
///
/// // Open a specific file
/// let store = YamlFileStore::open("/path/to/settings.yaml").unwrap();
///
/// // Open the default OS location
/// let store = YamlFileStore::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug)]
pub struct YamlFileStore {
    /// Path to the YAML file
    file_path: PathBuf,
    /// Current contents of the file
    values: RwLock<BTreeMap<String, StoreValue>>,
    /// YAML format
    format: YamlFormat,
}

impl YamlFileStore {
    /// Opens the store at `path`, loading its contents if the file exists.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read, is larger than 10MB, or
    /// does not parse.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let format = YamlFormat::new();
        let values = read_values(&file_path, &format)?;

        tracing::debug!(
            "Opened YAML store '{}' with {} keys",
            display_name(&file_path),
            values.len()
        );

        Ok(Self {
            file_path,
            values: RwLock::new(values),
            format,
        })
    }

    /// Opens `settings.yaml` in the OS-appropriate configuration directory.
    ///
    /// This method uses the `directories` crate to determine the directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "settings.yaml")
    }

    /// Opens a custom file name in the OS-appropriate configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name
    /// * `qualifier` - The organization/qualifier
    /// * `filename` - The store file name (e.g., "preferences.yaml")
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| StoreError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Self::open(proj_dirs.config_dir().join(filename))
    }

    /// Returns the path to the store file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Writes `values` to the store file.
    fn persist(&self, values: &BTreeMap<String, StoreValue>) -> Result<()> {
        let content = self.format.render(values)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error("create directory for", e))?;
            }
        }

        let mut tmp_name = self.file_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, content).map_err(|e| self.io_error("write", e))?;
        fs::rename(&tmp_path, &self.file_path).map_err(|e| self.io_error("replace", e))?;

        tracing::debug!(
            "Saved {} keys to YAML store '{}'",
            values.len(),
            display_name(&self.file_path)
        );
        Ok(())
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> StoreError {
        StoreError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!("Failed to {} store file: {}", action, display_name(&self.file_path)),
            source: Some(Box::new(e)),
        }
    }
}

/// Returns just the file name of `path`, for error messages.
fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

/// Reads and parses the store file; a missing file reads as empty.
fn read_values(path: &Path, format: &YamlFormat) -> Result<BTreeMap<String, StoreValue>> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => {
            return Err(StoreError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: format!("Failed to read file metadata: {}", display_name(path)),
                source: Some(Box::new(e)),
            })
        }
    };

    // Check file size before reading to prevent DoS via large files
    if metadata.len() > MAX_YAML_FILE_SIZE {
        return Err(StoreError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Store file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_YAML_FILE_SIZE
            ),
            source: None,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| StoreError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Failed to read store file: {}", display_name(path)),
        source: Some(Box::new(e)),
    })?;

    format.parse(&content)
}

impl KeyValueStore for YamlFileStore {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn object(&self, key: &StoreKey) -> Result<Option<StoreValue>> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::poisoned(SOURCE_NAME))?;
        Ok(values.get(key.as_str()).cloned())
    }

    fn set_object(&self, key: &StoreKey, value: StoreValue) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::poisoned(SOURCE_NAME))?;

        let previous = values.insert(key.as_str().to_string(), value);
        if let Err(e) = self.persist(&values) {
            // Keep memory in line with what is on disk.
            match previous {
                Some(previous) => values.insert(key.as_str().to_string(), previous),
                None => values.remove(key.as_str()),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_object(&self, key: &StoreKey) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::poisoned(SOURCE_NAME))?;

        let Some(previous) = values.remove(key.as_str()) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&values) {
            values.insert(key.as_str().to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    fn all_keys(&self) -> Result<Vec<StoreKey>> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::poisoned(SOURCE_NAME))?;
        Ok(values.keys().map(|k| StoreKey::from(k.as_str())).collect())
    }

    fn reload(&self) -> Result<()> {
        let fresh = read_values(&self.file_path, &self.format)?;
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::poisoned(SOURCE_NAME))?;
        *values = fresh;
        Ok(())
    }
}
