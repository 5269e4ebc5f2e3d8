use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".keyfoldrc.json";

/// Path fragments that are never scanned or rewritten.
///
/// Matched as substrings of the path relative to the project root, so `".test."`
/// covers `button.test.tsx` and `"node_modules"` covers every nested install.
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    "__tests__",
    ".test.",
    ".spec.",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_catalog_dir", alias = "messagesRoot")]
    pub catalog_dir: String,
    #[serde(default = "default_base_locale", alias = "primaryLocale")]
    pub base_locale: String,
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_technical_keys")]
    pub technical_keys: Vec<String>,
    #[serde(default)]
    pub ignore_literals: Vec<String>,
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_refactor_map_file")]
    pub refactor_map_file: String,
    #[serde(default = "default_replacement_log_file")]
    pub replacement_log_file: String,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignores() -> Vec<String> {
    DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect()
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx"].map(String::from).to_vec()
}

fn default_catalog_dir() -> String {
    "./src/config/translations".to_string()
}

fn default_base_locale() -> String {
    "pt".to_string()
}

fn default_placeholder() -> String {
    "TODO".to_string()
}

fn default_technical_keys() -> Vec<String> {
    ["\\n", "index", "normal", "alert", "close"]
        .map(String::from)
        .to_vec()
}

fn default_function_name() -> String {
    "t".to_string()
}

fn default_namespace() -> String {
    "i18n".to_string()
}

fn default_refactor_map_file() -> String {
    "refactor_map.json".to_string()
}

fn default_replacement_log_file() -> String {
    "refactor.log".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: default_ignores(),
            extensions: default_extensions(),
            catalog_dir: default_catalog_dir(),
            base_locale: default_base_locale(),
            locales: Vec::new(),
            placeholder: default_placeholder(),
            technical_keys: default_technical_keys(),
            ignore_literals: Vec::new(),
            function_name: default_function_name(),
            namespace: default_namespace(),
            refactor_map_file: default_refactor_map_file(),
            replacement_log_file: default_replacement_log_file(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a glob pattern in `ignores` is invalid, if the call
    /// grammar tokens are not plain identifiers, or if the base locale is empty.
    pub fn validate(&self) -> Result<()> {
        // Entries without wildcards are substring matches and always valid.
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        if self.base_locale.trim().is_empty() {
            bail!("'baseLocale' must not be empty");
        }

        if !is_identifier(&self.function_name) {
            bail!(
                "'functionName' must be a plain identifier, got \"{}\"",
                self.function_name
            );
        }

        if !is_identifier(&self.namespace) {
            bail!(
                "'namespace' must be a plain identifier, got \"{}\"",
                self.namespace
            );
        }

        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }

        Ok(())
    }
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
