//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--items`, `--theme`, etc.)
//! 2. `$SEARCHABLE_TABLE_CONFIG` environment variable (path to config file)
//! 3. Project-local `.searchable-table.toml` in the current working directory
//! 4. Global `~/.config/searchable-table/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use searchable_table::date_format::{DEFAULT_DETAIL_FORMAT, DEFAULT_ROW_FORMAT};
use searchable_table::DateFormat;

use crate::app_error::{AppError, Result};

// ── Section configs ──────────────────────────────────────────────────────────

/// Table behavior and presentation.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TableConfig {
    /// Title shown above the table.
    pub title: Option<String>,
    /// Leave edit mode after a rename completes.
    pub stop_edit_after_rename: Option<bool>,
    /// Ask before deleting a row.
    pub confirm_delete: Option<bool>,
    /// chrono pattern for the row subtitle.
    pub date_format: Option<String>,
    /// chrono pattern for the detail screen.
    pub detail_date_format: Option<String>,
}

/// Demo data settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of seeded items.
    pub item_count: Option<usize>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Log file path. No file, no logging.
    pub file: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub row_fg: Option<String>,
    pub row_detail_fg: Option<String>,
    pub row_selected_bg: Option<String>,
    pub row_selected_fg: Option<String>,
    pub search_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
    pub border_focused_fg: Option<String>,
    pub dialog_border_fg: Option<String>,
    pub accent_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub table: TableConfig,
    pub demo: DemoConfig,
    pub theme: ThemeConfig,
    pub log: LogConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

pub const DEFAULT_TITLE: &str = "Searchable Table View Demo";
pub const DEFAULT_ITEM_COUNT: usize = 10;
pub const DEFAULT_LOG_FILTER: &str = "searchable_table=info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("SEARCHABLE_TABLE_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".searchable-table.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("searchable-table").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            table: TableConfig {
                title: other.table.title.clone().or(self.table.title),
                stop_edit_after_rename: other
                    .table
                    .stop_edit_after_rename
                    .or(self.table.stop_edit_after_rename),
                confirm_delete: other.table.confirm_delete.or(self.table.confirm_delete),
                date_format: other.table.date_format.clone().or(self.table.date_format),
                detail_date_format: other
                    .table
                    .detail_date_format
                    .clone()
                    .or(self.table.detail_date_format),
            },
            demo: DemoConfig {
                item_count: other.demo.item_count.or(self.demo.item_count),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: other.theme.custom.clone().or(self.theme.custom),
            },
            log: LogConfig {
                file: other.log.file.clone().or(self.log.file),
                filter: other.log.filter.clone().or(self.log.filter),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn title(&self) -> &str {
        self.table.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn stop_edit_after_rename(&self) -> bool {
        self.table.stop_edit_after_rename.unwrap_or(false)
    }

    pub fn confirm_delete(&self) -> bool {
        self.table.confirm_delete.unwrap_or(true)
    }

    pub fn item_count(&self) -> usize {
        self.demo.item_count.unwrap_or(DEFAULT_ITEM_COUNT)
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log.file.as_deref()
    }

    pub fn log_filter(&self) -> &str {
        self.log.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }

    /// Date patterns for rows and the detail screen, validated.
    pub fn date_format(&self) -> Result<DateFormat> {
        let row = self.table.date_format.as_deref().unwrap_or(DEFAULT_ROW_FORMAT);
        let detail = self
            .table
            .detail_date_format
            .as_deref()
            .unwrap_or(DEFAULT_DETAIL_FORMAT);
        DateFormat::parse(row, detail).map_err(AppError::Config)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
