//! Context configuration file I/O

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::context as context_config;
use crate::error::{NgsiError, Result};

use super::models::{Context, ContextConfig};

/// Reads and writes the broker context file
pub struct ContextStore {
    config_path: PathBuf,
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

fn io_error(action: &str, path: &Path, err: impl Display) -> NgsiError {
    NgsiError::Config(format!("Failed to {} {}: {}", action, path.display(), err))
}

impl ContextStore {
    /// Store at the default path (~/.ngsictl/config.json)
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Store at a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(context_config::DIR_NAME)
            .join(context_config::FILE_NAME)
    }

    /// Load the context file; a missing file is an empty configuration
    pub fn load(&self) -> Result<ContextConfig> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ContextConfig::default())
            }
            Err(e) => return Err(io_error("read context config", &self.config_path, e)),
        };
        serde_json::from_str(&content)
            .map_err(|e| io_error("parse context config", &self.config_path, e))
    }

    /// Look up one context by name
    pub fn get(&self, name: &str) -> Result<Option<Context>> {
        Ok(self.load()?.contexts.remove(name))
    }

    /// Write the context file atomically (tmp file + rename), mode 0600 on Unix
    pub fn save(&self, config: &ContextConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error("create config directory", parent, e))?;
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| NgsiError::Config(format!("Failed to serialize context config: {}", e)))?;

        let tmp_path = self.config_path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| io_error("write temp config file", &tmp_path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))
                .map_err(|e| io_error("set permissions on", &tmp_path, e))?;
        }

        fs::rename(&tmp_path, &self.config_path)
            .map_err(|e| io_error("replace config file", &self.config_path, e))
    }
}
