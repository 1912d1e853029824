// Runner configuration, read once from the environment at start-up

use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::language::LanguageRegistry;
use crate::logging::LogFormat;

/// Presence (not value) switches on verbose failure diagnostics
pub const DEBUG_ENV: &str = "PY_DEBUG";
pub const BASE_DIR_ENV: &str = "CFGCHECK_BASE_DIR";
pub const REGISTRY_ENV: &str = "CFGCHECK_REGISTRY";
pub const LOG_FORMAT_ENV: &str = "CFGCHECK_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    /// Directory holding one subdirectory per language sample
    pub base_dir: PathBuf,
    pub debug: bool,
    /// YAML file replacing the built-in language table
    pub registry_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl RunnerConfig {
    /// Build from the process environment, defaulting the base directory to
    /// the current working directory. Only the variables above are read; a
    /// value that is not valid UTF-8 counts as unset, except for `PY_DEBUG`
    /// where presence alone matters.
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::from_lookup(
            |key| std::env::var_os(key).map(|v| v.into_string().unwrap_or_default()),
            cwd,
        )
    }

    pub fn from_lookup<F>(lookup: F, cwd: PathBuf) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_dir = match lookup(BASE_DIR_ENV).filter(|v| !v.is_empty()) {
            Some(dir) => cwd.join(dir),
            None => cwd,
        };

        let registry_path = lookup(REGISTRY_ENV)
            .filter(|v| !v.is_empty())
            .map(|p| base_dir.join(p));

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            None | Some("") | Some("full") => LogFormat::Full,
            Some("pretty") => LogFormat::Pretty,
            Some("compact") => LogFormat::Compact,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    variable: LOG_FORMAT_ENV.to_string(),
                    value: other.to_string(),
                    expected: "full, pretty, compact or json".to_string(),
                }
                .into())
            }
        };

        Ok(Self {
            base_dir,
            debug: lookup(DEBUG_ENV).is_some(),
            registry_path,
            log_format,
        })
    }

    /// The registry selected by this configuration
    pub fn load_registry(&self) -> Result<LanguageRegistry> {
        match &self.registry_path {
            Some(path) => LanguageRegistry::from_yaml_file(path),
            None => Ok(LanguageRegistry::builtin().clone()),
        }
    }
}
