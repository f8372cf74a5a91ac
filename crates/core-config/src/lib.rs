//! Configuration loading for `tinydiff.toml`.
//!
//! Every table and field is optional; absent values take the defaults below.
//! Unknown fields are ignored so older binaries accept newer files. A file
//! that fails to parse is replaced wholesale by defaults; the viewer never
//! refuses to start over configuration.
//!
//! Loading happens before logging exists (the log directory is itself a
//! setting), so `load_from` records a `LoadOutcome` instead of logging.
//! `Config::report_load` emits it, at warn level for a parse failure.
//!
//! Raw values are kept as parsed. Range limits and name lookups happen in the
//! accessor methods on `Config`, which log under the `config` target whenever
//! they have to correct a value.

use anyhow::Result;
use core_diff::DiffAlgorithm;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const FILE_NAME: &str = "tinydiff.toml";
pub const TIMEOUT_MS_RANGE: (u64, u64) = (10, 60_000);
pub const TAB_WIDTH_RANGE: (usize, usize) = (1, 16);

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

impl InputConfig {
    const fn default_timeout_ms() -> u64 {
        1000
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiffConfig {
    #[serde(default = "DiffConfig::default_algorithm")]
    pub algorithm: String,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            algorithm: Self::default_algorithm(),
        }
    }
}

impl DiffConfig {
    fn default_algorithm() -> String {
        DiffAlgorithm::default().to_string()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    #[serde(default = "ViewConfig::default_tab_width")]
    pub tab_width: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tab_width: Self::default_tab_width(),
        }
    }
}

impl ViewConfig {
    const fn default_tab_width() -> usize {
        4
    }
}

/// Colour names, resolved by the renderer.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub cursor_line: String,
    pub deleted: String,
    pub inserted: String,
    pub changed: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            cursor_line: "yellow".into(),
            deleted: "red".into(),
            inserted: "green".into(),
            changed: "blue".into(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub diff: DiffConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// What `load_from` found at the configured path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadOutcome {
    #[default]
    Absent,
    Loaded {
        bytes: usize,
    },
    ParseFailed {
        error: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>, // file consulted
    pub outcome: LoadOutcome,
    pub file: ConfigFile,
}

/// Config path: `./tinydiff.toml` if present, else the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("tinydiff").join(FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config {
            path: Some(path),
            ..Config::default()
        });
    };
    let (file, outcome) = match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => (
            file,
            LoadOutcome::Loaded {
                bytes: content.len(),
            },
        ),
        Err(e) => (
            ConfigFile::default(),
            LoadOutcome::ParseFailed {
                error: e.message().to_string(),
            },
        ),
    };
    Ok(Config {
        path: Some(path),
        outcome,
        file,
    })
}

impl Config {
    /// Log how the configuration was obtained. Call once logging is up.
    pub fn report_load(&self) {
        let path = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match &self.outcome {
            LoadOutcome::Absent => {
                info!(target: "config", %path, "config_absent_using_defaults");
            }
            LoadOutcome::Loaded { bytes } => {
                info!(target: "config", %path, bytes = *bytes, "config_loaded");
            }
            LoadOutcome::ParseFailed { error } => {
                warn!(target: "config", %path, %error, "config_parse_failed_using_defaults");
            }
        }
    }

    /// First-byte wait of the key decoder, clamped to `TIMEOUT_MS_RANGE`.
    pub fn input_timeout(&self) -> Duration {
        let raw = self.file.input.timeout_ms;
        let (lo, hi) = TIMEOUT_MS_RANGE;
        let clamped = raw.clamp(lo, hi);
        if clamped != raw {
            info!(target: "config", raw, clamped, "input_timeout_clamped");
        }
        Duration::from_millis(clamped)
    }

    /// Configured algorithm; an unknown name falls back to the default.
    pub fn diff_algorithm(&self) -> DiffAlgorithm {
        match self.file.diff.algorithm.parse() {
            Ok(alg) => alg,
            Err(reason) => {
                let fallback = DiffAlgorithm::default();
                warn!(target: "config", %reason, %fallback, "diff_algorithm_unknown");
                fallback
            }
        }
    }

    pub fn tab_width(&self) -> usize {
        let raw = self.file.view.tab_width;
        let (lo, hi) = TAB_WIDTH_RANGE;
        let clamped = raw.clamp(lo, hi);
        if clamped != raw {
            info!(target: "config", raw, clamped, "tab_width_clamped");
        }
        clamped
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.file.theme
    }

    /// Directory receiving `tinydiff.log`.
    pub fn log_dir(&self) -> PathBuf {
        self.file.log.dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
