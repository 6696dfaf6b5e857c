use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Categories kept per view
    pub top_n: usize,
    /// Only count events that began in this year or later
    pub since_year: Option<i32>,
    /// Divisor applied to economic values in table output
    pub economic_scale: f64,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// tracing-subscriber filter directive, used when RUST_LOG is unset
    pub filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    /// Extension for files written with `--out`; tables are saved as CSV
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Table | OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top_n: storm_core::DEFAULT_TOP_N,
            since_year: None,
            economic_scale: 1e9,
            format: OutputFormat::Table,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Explicit path first, then `$HOME/.stormrank/config.toml`; None without either
fn resolve_config_path(path: Option<&Path>, home: Option<OsString>) -> Option<PathBuf> {
    match path {
        Some(p) => Some(p.to_path_buf()),
        None => home.map(|h| PathBuf::from(h).join(".stormrank").join("config.toml")),
    }
}

/// Load `path`, or the default location when None.
///
/// A missing file, or no HOME to find the default one in, yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    load_resolved(resolve_config_path(path, std::env::var_os("HOME")))
}

fn load_resolved(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(p) => load_config_file(&p),
        None => Ok(Config::default()),
    }
}

fn load_config_file(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the default config to `path` (or the default location) unless a
/// file is already there. Returns the path and whether it was written.
pub fn init_config(path: Option<&Path>) -> Result<(PathBuf, bool)> {
    let Some(p) = resolve_config_path(path, std::env::var_os("HOME")) else {
        bail!("HOME is not set (pass --config <path>)");
    };
    if p.exists() {
        return Ok((p, false));
    }
    save_config(&Config::default(), &p)?;
    Ok((p, true))
}
