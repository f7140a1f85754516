use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override, read from `POPCORN_HOME`
pub fn home_override() -> Option<PathBuf> {
    std::env::var("POPCORN_HOME").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("popcorn");

        Ok(Self::with_base(base_dir))
    }

    /// Lay out config files at `base`, data and logs in subdirectories
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    /// Backing file for one key of the key-value store
    pub fn store_file(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Resolve the configured log file. A bare file name lands in the logs directory.
    pub fn log_file(&self, configured: &Path) -> PathBuf {
        let bare = configured
            .parent()
            .map(|parent| parent.as_os_str().is_empty())
            .unwrap_or(true);
        if bare {
            self.log_dir.join(configured)
        } else {
            configured.to_path_buf()
        }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = home_override() {
            return Self::with_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/popcorn on Linux), falling back to the working directory
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".popcorn")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/popcorn-test"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/popcorn-test/config.toml"));
        assert_eq!(paths.credentials_file(), PathBuf::from("/tmp/popcorn-test/credentials.toml"));
        assert_eq!(paths.store_file("watched"), PathBuf::from("/tmp/popcorn-test/data/watched.json"));
    }

    #[test]
    fn test_log_file_resolution() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/popcorn-test"));
        assert_eq!(
            paths.log_file(Path::new("popcorn.log")),
            PathBuf::from("/tmp/popcorn-test/logs/popcorn.log")
        );
        assert_eq!(
            paths.log_file(Path::new("/var/log/popcorn.log")),
            PathBuf::from("/var/log/popcorn.log")
        );
        assert_eq!(
            paths.log_file(Path::new("logs/today.log")),
            PathBuf::from("logs/today.log")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::with_base(dir.path().join("popcorn"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
