use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable that overrides `base_url` from the file.
pub const BASE_URL_ENV: &str = "HCP_AGENT_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Agent base URL; requests go to `{base_url}/chat`.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely. Added in v1.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Added in v1.
    #[serde(default)]
    pub log_format: LogFormat,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            log_format: LogFormat::Text,
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl ConsoleConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Replace `base_url` when an override is present and non-blank.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            tracing::info!(base_url = %url, "agent URL overridden from environment");
            self.base_url = url;
        }
        self
    }
}

/// Directory holding `config.json`.
pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.hcp.console"))
}

/// A config read from disk, before anything about it has been logged or
/// written. Loading happens before the tracing subscriber exists, so the
/// side effects wait for [`LoadedConfig::settle`].
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ConsoleConfig,
    /// Version found on disk when a migration ran.
    pub migrated_from: Option<u32>,
    /// No file existed and `config` holds unsaved defaults.
    pub is_new: bool,
}

impl LoadedConfig {
    /// Log the migration, if any, and write defaults on first run. A failed
    /// write is returned so the caller decides how loud to be.
    pub fn settle(&self, dir: &Path) -> eyre::Result<()> {
        if let Some(from) = self.migrated_from {
            tracing::info!(from, to = CURRENT_VERSION, "migrated config");
        }
        if self.is_new {
            save_config_in(dir, &self.config)?;
        }
        Ok(())
    }

    /// The settled config with the environment override applied. The
    /// override is never persisted.
    pub fn resolve(self, base_url_override: Option<String>) -> ConsoleConfig {
        self.config.with_base_url_override(base_url_override)
    }
}

/// Read `config.json` from `dir`, falling back to defaults when it does
/// not exist yet. Nothing is logged or written.
pub fn load_config_in(dir: &Path) -> eyre::Result<LoadedConfig> {
    let path = dir.join("config.json");
    if !path.exists() {
        return Ok(LoadedConfig {
            config: ConsoleConfig::default(),
            migrated_from: None,
            is_new: true,
        });
    }

    let (config, on_disk_version) = read_config(&path)?;
    Ok(LoadedConfig {
        config,
        migrated_from: (on_disk_version < CURRENT_VERSION).then_some(on_disk_version),
        is_new: false,
    })
}

pub fn load_config_from(path: &Path) -> eyre::Result<ConsoleConfig> {
    Ok(read_config(path)?.0)
}

fn read_config(path: &Path) -> eyre::Result<(ConsoleConfig, u32)> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: ConsoleConfig = serde_json::from_value(migrated)?;
    Ok((config, on_disk_version))
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update hcp-console."
        ));
    }

    // v0 → v1: add request_timeout_secs (none) and log_format (text)
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("request_timeout_secs")
            .or_insert(serde_json::Value::Null);
        obj.entry("log_format")
            .or_insert(serde_json::Value::String("text".to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
    }

    Ok(json)
}

/// Write `config.json` into `dir`, stamped with the current version.
pub fn save_config_in(dir: &Path, config: &ConsoleConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
