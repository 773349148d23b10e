//! File-backed [`ConfigStore`].

use crate::error::HostError;
use crate::host::ConfigStore;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores a plugin's config document in a single file, conventionally
/// `<config dir>/<PluginName>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `plugin_name` inside `config_dir`.
    pub fn for_plugin(config_dir: &Path, plugin_name: &str) -> Self {
        Self::new(config_dir.join(format!("{plugin_name}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> HostError {
        HostError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigStore for JsonFileStore {
    fn read(&self) -> Result<Option<String>, HostError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "No config file yet");
                Ok(None)
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<(), HostError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        std::fs::write(&self.path, contents).map_err(|e| self.io_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::for_plugin(&dir.path().join("oxide/config"), "Demo");
        store.write("{}").unwrap();
        assert!(store.path().ends_with("oxide/config/Demo.json"));
        assert_eq!(store.read().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn write_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("c.json"));
        store.write(r#"{"a":1}"#).unwrap();
        store.write(r#"{"b":2}"#).unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some(r#"{"b":2}"#));
    }

    #[test]
    fn reading_a_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let err = store.read().unwrap_err();
        assert!(matches!(err, HostError::Io { .. }));
    }
}
