use std::path::{Path, PathBuf};
use std::time::Duration;

use oncoscope_client::backend::SchemaSource;
use oncoscope_client::http::HttpBackendConfig;
use oncoscope_client::schema_source::{CatalogSchemaSource, FileSchemaSource};
use oncoscope_core::catalog::Selection;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "ONCOSCOPE_API_URL";
pub const ENV_SCHEMA_FILE: &str = "ONCOSCOPE_SCHEMA_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OncoscopeConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub api_base_url: String,
    /// Added in v1.
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaConfig {
    Catalog {
        #[serde(default)]
        selection: Selection,
    },
    File {
        path: PathBuf,
    },
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig::Catalog {
            selection: Selection::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for OncoscopeConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            schema: SchemaConfig::default(),
            log_format: LogFormat::default(),
        }
    }
}

/// Command-line values that take precedence over the file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub schema_file: Option<PathBuf>,
    pub full_catalog: bool,
    pub log_json: bool,
}

impl OncoscopeConfig {
    /// Apply `ONCOSCOPE_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(path) = lookup(ENV_SCHEMA_FILE).filter(|v| !v.trim().is_empty()) {
            self.schema = SchemaConfig::File { path: path.into() };
        }
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = &overrides.api_url {
            self.api_base_url = url.clone();
        }
        if let Some(path) = &overrides.schema_file {
            self.schema = SchemaConfig::File { path: path.clone() };
        } else if overrides.full_catalog {
            self.schema = SchemaConfig::Catalog {
                selection: Selection::Full,
            };
        }
        if overrides.log_json {
            self.log_format = LogFormat::Json;
        }
    }

    /// Request timeout in seconds; 0 falls back to the default.
    pub fn effective_timeout_secs(&self) -> u64 {
        match self.request_timeout_secs {
            0 => DEFAULT_TIMEOUT_SECS,
            secs => secs,
        }
    }

    pub fn backend_config(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.effective_timeout_secs()),
        }
    }

    pub fn schema_source(&self) -> Box<dyn SchemaSource> {
        match &self.schema {
            SchemaConfig::Catalog { selection } => Box::new(CatalogSchemaSource::new(*selection)),
            SchemaConfig::File { path } => Box::new(FileSchemaSource::new(path.clone())),
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("oncoscope"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the user's config, or defaults when none has been written.
pub fn load_config() -> eyre::Result<OncoscopeConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return Ok(OncoscopeConfig::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> eyre::Result<OncoscopeConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(raw) => u32::try_from(raw)
            .map_err(|_| eyre::eyre!("config_version {raw} is out of range"))?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: OncoscopeConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update oncoscope."
        ));
    }

    // v0 → v1: add request_timeout_secs
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("request_timeout_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_TIMEOUT_SECS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added request_timeout_secs)");
    }

    Ok(json)
}

pub fn save_config(config: &OncoscopeConfig) -> eyre::Result<PathBuf> {
    let path = config_path()?;
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &OncoscopeConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
