//! Storage backends for the settings entry

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the settings entry inside the config directory
pub const SETTINGS_FILE: &str = "settings.json";

/// A single key-value slot holding the serialized settings
pub trait SettingsBackend {
    /// Stored text, or `None` when nothing has been saved yet
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the stored text
    fn write(&mut self, contents: &str) -> io::Result<()>;

    /// Human-readable location for log messages
    fn describe(&self) -> String;
}

/// Settings file on disk
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file in the platform config directory
    pub fn default_location() -> Self {
        Self::new(Self::default_path())
    }

    /// Get default settings file path
    pub fn default_path() -> PathBuf {
        let base = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .map(|h| h.join("Library/Application Support/Lucky Draw"))
                .unwrap_or_else(|| PathBuf::from("."))
        } else if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .map(|d| d.join("Lucky Draw"))
                .unwrap_or_else(|| PathBuf::from("."))
        } else {
            dirs::config_dir()
                .map(|d| d.join("lucky-draw"))
                .unwrap_or_else(|| PathBuf::from("."))
        };
        base.join(SETTINGS_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsBackend for FileBackend {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process slot; used by tests and sessions that must not touch disk
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: Option<String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with stored text
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    /// A backend whose reads and writes fail, like a locked-down storage
    pub fn unavailable() -> Self {
        Self {
            contents: None,
            fail_reads: true,
            fail_writes: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<String>> {
        if self.fail_reads {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "storage unavailable",
            ));
        }
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "storage unavailable",
            ));
        }
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("absent.json"));
        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn test_file_backend_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join(SETTINGS_FILE);
        let mut backend = FileBackend::new(&path);

        backend.write("{}").unwrap();
        assert!(path.exists());
        assert_eq!(backend.read().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(FileBackend::default_path().ends_with(SETTINGS_FILE));
    }

    #[test]
    fn test_memory_backend() {
        let mut backend = MemoryBackend::new();
        assert!(backend.read().unwrap().is_none());
        backend.write("abc").unwrap();
        assert_eq!(backend.contents(), Some("abc"));

        let mut broken = MemoryBackend::unavailable();
        assert!(broken.read().is_err());
        assert!(broken.write("abc").is_err());
    }
}
