use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".teny.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,

    /// Word list used by `/corriger` and the `check` command
    pub corrector_dictionary: PathBuf,

    /// Word list used by the `/dictionary/*` lookups
    pub dictionary: PathBuf,

    pub max_suggestions: usize,

    pub wikipedia: WikipediaConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WikipediaConfig {
    pub api_url: String,
    pub lang: String,
    pub timeout_secs: u64,
    pub search_limit: usize,
    pub user_agent: String,
}

/// One config file layer. Only keys present in the file are set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub bind_addr: Option<String>,
    pub corrector_dictionary: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
    pub max_suggestions: Option<usize>,
    #[serde(default)]
    pub wikipedia: WikipediaFile,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WikipediaFile {
    pub api_url: Option<String>,
    pub lang: Option<String>,
    pub timeout_secs: Option<u64>,
    pub search_limit: Option<usize>,
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            corrector_dictionary: PathBuf::from("data/dictionnaire.txt"),
            dictionary: PathBuf::from("data/malagasy_dictionary.txt"),
            max_suggestions: 5,
            wikipedia: WikipediaConfig::default(),
        }
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: "https://mg.wikipedia.org/w/api.php".to_string(),
            lang: "mg".to_string(),
            timeout_secs: 5,
            search_limit: 10,
            user_agent: format!("teny/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub bind_addr: Option<String>,
    pub corrector_dictionary: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
}

impl Config {
    /// Load configuration with priority: CLI args > explicit/local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.apply(ConfigFile::from_file(&global_path)?);
            }
        }

        // Load local config (overrides global); an explicit file replaces it
        let local_path = overrides
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
        if local_path.exists() {
            config.apply(ConfigFile::from_file(&local_path)?);
        } else if overrides.config_file.is_some() {
            anyhow::bail!("Config file not found: {}", local_path.display());
        }

        // Apply CLI overrides
        if let Some(addr) = overrides.bind_addr {
            config.bind_addr = addr;
        }
        if let Some(path) = overrides.corrector_dictionary {
            config.corrector_dictionary = path;
        }
        if let Some(path) = overrides.dictionary {
            config.dictionary = path;
        }

        tracing::debug!(?config, "configuration resolved");

        Ok(config)
    }

    /// Overlay every key the file sets, whatever its value
    pub fn apply(&mut self, file: ConfigFile) {
        if let Some(addr) = file.bind_addr {
            self.bind_addr = addr;
        }
        if let Some(path) = file.corrector_dictionary {
            self.corrector_dictionary = path;
        }
        if let Some(path) = file.dictionary {
            self.dictionary = path;
        }
        if let Some(max) = file.max_suggestions {
            self.max_suggestions = max;
        }
        self.wikipedia.apply(file.wikipedia);
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "teny").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

impl WikipediaConfig {
    fn apply(&mut self, file: WikipediaFile) {
        if let Some(url) = file.api_url {
            self.api_url = url;
        }
        if let Some(lang) = file.lang {
            self.lang = lang;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(limit) = file.search_limit {
            self.search_limit = limit;
        }
        if let Some(agent) = file.user_agent {
            self.user_agent = agent;
        }
    }
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
