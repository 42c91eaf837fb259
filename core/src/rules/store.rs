//! Loading, saving and sharing the live rule set.
//!
//! Check runs take an `Arc<RuleSet>` snapshot and never hold the lock while
//! evaluating. Mutations clone the current set, edit the clone and swap it in,
//! so a reader sees either the old rules or the new ones, never a half-rebuilt
//! prefix table.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use pvpchecks_types::RulesConfig;

use super::RuleSet;
use crate::error::{ConfigError, RuleError};

/// Shared, swappable rule set backed by an optional TOML file.
#[derive(Debug)]
pub struct RuleStore {
    path: Option<PathBuf>,
    current: RwLock<Arc<RuleSet>>,
}

impl RuleStore {
    /// Store with no backing file. `persist` and `reload` are no-ops.
    pub fn in_memory(rules: RuleSet) -> Self {
        Self {
            path: None,
            current: RwLock::new(Arc::new(rules)),
        }
    }

    /// Load rules from `path`, writing a default file first if none exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let rules = load_or_create(&path)?;
        Ok(Self {
            path: Some(path),
            current: RwLock::new(Arc::new(rules)),
        })
    }

    /// Open the rules file in the default location.
    pub fn open_default() -> Result<Self, ConfigError> {
        let path = default_rules_path().ok_or(ConfigError::NoRulesPath)?;
        Self::open(path)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Consistent view of the current rules.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Apply a mutation. On error the live rules are left untouched.
    pub fn update<T>(
        &self,
        mutate: impl FnOnce(&mut RuleSet) -> Result<T, RuleError>,
    ) -> Result<T, RuleError> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = RuleSet::clone(&guard);
        let result = mutate(&mut next)?;
        *guard = Arc::new(next);
        Ok(result)
    }

    /// Replace the rules wholesale.
    pub fn replace(&self, rules: RuleSet) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(rules);
    }

    /// Re-read the backing file. On failure the current rules stay live.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let rules = load_or_create(path)?;
        self.replace(rules);
        tracing::info!(path = %path.display(), "Reloaded PvP rules");
        Ok(())
    }

    /// Write the current rules to the backing file.
    pub fn persist(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        save_file(path, &self.snapshot().to_config())?;
        tracing::debug!(path = %path.display(), "Saved PvP rules");
        Ok(())
    }
}

fn load_or_create(path: &Path) -> Result<RuleSet, ConfigError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "No rules file found, writing defaults");
        save_file(path, &RulesConfig::default())?;
    }
    RuleSet::from_config(load_file(path)?)
}

/// Load a rules file
pub fn load_file(path: &Path) -> Result<RulesConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save a rules file, creating parent directories as needed
pub fn save_file(path: &Path, config: &RulesConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Get the default rules file location
pub fn default_rules_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pvpchecks").join("rules.toml"))
}
