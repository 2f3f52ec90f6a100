use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Config file read when neither `--config` nor `HOSTSNAP_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "hostsnap.toml";

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "HOSTSNAP_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// File written by `--txt` unless `--output` overrides it.
    #[serde(default = "default_txt_path")]
    pub txt_path: String,
    #[serde(default = "default_true")]
    pub banner: bool,
    /// Wait for ENTER after the interactive report.
    #[serde(default = "default_true")]
    pub pause: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            txt_path: default_txt_path(),
            banner: true,
            pause: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_txt_path() -> String {
    "systeminfo.txt".into()
}

fn default_log_level() -> String {
    "warn".into()
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Explicit path (flag, then env var) must exist; the default path is optional and
    /// defaults apply when it is absent.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match explicit {
            Some(path) => Self::load_from_file(&path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load_from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::load_from_str(&s).with_context(|| format!("config {}", path.display()))
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.output.txt_path.trim().is_empty(),
            "output.txt_path must be non-empty"
        );
        anyhow::ensure!(
            EnvFilter::try_new(&self.logging.level).is_ok(),
            "logging.level is not a valid filter directive: {:?}",
            self.logging.level
        );
        Ok(())
    }
}
