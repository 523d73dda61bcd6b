use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, DEFAULT_METHODS, DEFAULT_NAMESPACES, PACKAGE_JSON_FILENAME};
use crate::fix::{Strategy, StrategyError};
use crate::matcher::{TargetError, TargetSpec};

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for delog.
    pub delog: DelogConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
/// Configuration options for delog.
pub struct DelogConfig {
    /// Namespaces whose methods are matched, e.g. `console`.
    pub namespaces: Option<Vec<String>>,
    /// Method names matched on every namespace, e.g. `log`.
    pub methods: Option<Vec<String>>,
    /// Explicit dotted targets; replaces the namespace × method product when set.
    pub targets: Option<Vec<String>>,
    /// Replacement strategy: `comment`, `null`, or a `{call}` template.
    pub strategy: Option<String>,
    /// Swallow the semicolon that directly follows a matched call.
    #[serde(alias = "removeSemicolonIfPossible")]
    pub remove_semicolon: Option<bool>,
    /// List of folders to exclude.
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to include even if excluded by default.
    pub include_folders: Option<Vec<String>>,
    /// File extensions to process (without the dot).
    pub extensions: Option<Vec<String>>,
}

impl DelogConfig {
    /// Resolve the configured targets, falling back to the defaults.
    ///
    /// # Errors
    /// Returns an error if an explicit dotted target is malformed.
    pub fn target_spec(&self) -> Result<TargetSpec, TargetError> {
        if let Some(targets) = &self.targets {
            return TargetSpec::parse_list(targets);
        }
        let defaults = |list: &[&str]| list.iter().map(|&s| s.to_owned()).collect::<Vec<_>>();
        let namespaces = self
            .namespaces
            .clone()
            .unwrap_or_else(|| defaults(DEFAULT_NAMESPACES));
        let methods = self
            .methods
            .clone()
            .unwrap_or_else(|| defaults(DEFAULT_METHODS));
        Ok(TargetSpec::cross(&namespaces, &methods))
    }

    /// Resolve the configured strategy, if any.
    ///
    /// # Errors
    /// Returns an error if the strategy name is unknown.
    pub fn strategy(&self) -> Result<Option<Strategy>, StrategyError> {
        self.strategy
            .as_deref()
            .map(str::parse::<Strategy>)
            .transpose()
    }
}

#[derive(Debug, Deserialize, Clone)]
struct PackageJson {
    delog: DelogConfig,
}

impl Config {
    /// Loads configuration from default locations (.delog.toml or package.json in current dir).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }
        if let Ok(absolute) = current.canonicalize() {
            current = absolute;
        }

        loop {
            // 1. Try CONFIG_FILENAME
            let delog_toml = current.join(CONFIG_FILENAME);
            if delog_toml.exists() {
                if let Ok(content) = fs::read_to_string(&delog_toml) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(delog_toml);
                        return config;
                    }
                }
            }

            // 2. Try PACKAGE_JSON_FILENAME with a "delog" key
            let package_json = current.join(PACKAGE_JSON_FILENAME);
            if package_json.exists() {
                if let Ok(content) = fs::read_to_string(&package_json) {
                    if let Ok(package) = serde_json::from_str::<PackageJson>(&content) {
                        return Config {
                            delog: package.delog,
                            config_file_path: Some(package_json),
                        };
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}
