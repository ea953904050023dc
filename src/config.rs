//! Tool configuration.
//!
//! Handles loading, validating, and merging `mdwikify.toml`. The file is
//! optional and lives in the wiki root; values it sets override the stock
//! defaults, everything else keeps its default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "My Wiki"          # Root index, navigation and config.json title
//! theme = "bootstrap"        # Theme selected in navigation.md
//! ignore = ["README.md", "navigation.md", "index.md"]
//!
//! [viewer]
//! url = "https://github.com/Dynalon/mdwiki/releases/download/0.6.2/mdwiki-0.6.2.zip"
//! asset = "mdwiki.html"      # File extracted from the archive
//! entry_file = "index.html"  # Name it is installed under
//! filenames = ["mdwiki.html", "mdwiki-slim.html", "mdwiki-debug.html", "index.html"]
//! timeout_secs = 10
//!
//! [site]                     # Written to config.json
//! use_side_menu = true
//! line_breaks = "gfm"
//! additional_footer_text = ""
//! anchor_character = "&#x2693;"
//!
//! [processing]
//! max_processes = 4          # Max parallel scan workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file in the wiki root.
pub const CONFIG_FILENAME: &str = "mdwikify.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything the generator needs to know beyond the filesystem itself.
///
/// Passed explicitly into each component so tests (or concurrent runs) can
/// use different settings without interfering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WikiConfig {
    /// Wiki title: root index heading, navigation heading, config.json title.
    pub title: String,
    /// Theme selected by the navigation document's theme directive.
    pub theme: String,
    /// Filenames never listed as pages in the root index or offered for
    /// navigation.
    pub ignore: Vec<String>,
    /// Where to fetch the viewer and how to recognize an existing install.
    pub viewer: ViewerConfig,
    /// Static options written to `config.json`.
    pub site: SiteOptions,
    /// Parallel scanning settings.
    pub processing: ProcessingConfig,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            title: "My Wiki".to_string(),
            theme: "bootstrap".to_string(),
            ignore: vec![
                "README.md".to_string(),
                "navigation.md".to_string(),
                "index.md".to_string(),
            ],
            viewer: ViewerConfig::default(),
            site: SiteOptions::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl WikiConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.theme.trim().is_empty() {
            return Err(ConfigError::Validation("theme must not be empty".into()));
        }
        if self.viewer.asset.is_empty() || self.viewer.entry_file.is_empty() {
            return Err(ConfigError::Validation(
                "viewer.asset and viewer.entry_file must not be empty".into(),
            ));
        }
        if self.viewer.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "viewer.timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Filenames that mean "the viewer is already installed".
    ///
    /// The configured list plus `<title>.html`.
    pub fn viewer_filenames(&self) -> Vec<String> {
        let mut names = self.viewer.filenames.clone();
        let titled = format!("{}.html", self.title);
        if !names.contains(&titled) {
            names.push(titled);
        }
        names
    }

    /// The combined ignore set for root navigation candidates: the explicit
    /// ignore list plus the viewer's own files.
    pub fn navigation_ignore(&self) -> BTreeSet<String> {
        self.ignore
            .iter()
            .cloned()
            .chain(self.viewer_filenames())
            .collect()
    }
}

/// Viewer download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Release archive URL.
    pub url: String,
    /// Name of the file to extract from the archive's top-level directory.
    pub asset: String,
    /// Name the extracted file is installed under in the wiki root.
    pub entry_file: String,
    /// Asset names whose presence in the root means "already installed".
    pub filenames: Vec<String>,
    /// HTTP timeout for the download.
    pub timeout_secs: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            url: "https://github.com/Dynalon/mdwiki/releases/download/0.6.2/mdwiki-0.6.2.zip"
                .to_string(),
            asset: "mdwiki.html".to_string(),
            entry_file: "index.html".to_string(),
            filenames: vec![
                "mdwiki.html".to_string(),
                "mdwiki-slim.html".to_string(),
                "mdwiki-debug.html".to_string(),
                "index.html".to_string(),
            ],
            timeout_secs: 10,
        }
    }
}

/// Static viewer options written to `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteOptions {
    pub use_side_menu: bool,
    /// Line break handling, `"gfm"` or `"original"`.
    pub line_breaks: String,
    pub additional_footer_text: String,
    /// HTML entity shown next to heading anchors.
    pub anchor_character: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            use_side_menu: true,
            line_breaks: "gfm".to_string(),
            additional_footer_text: String::new(),
            anchor_character: "&#x2693;".to_string(),
        }
    }
}

/// Parallel scanning settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel scan workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(WikiConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `mdwikify.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Load config for a wiki root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<WikiConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let config: WikiConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `mdwikify.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# mdwikify Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Wiki title. Used as the heading of the root index.md and navigation.md,
# and as "title" in config.json.
title = "My Wiki"

# Theme selected in navigation.md. The theme chooser stays available.
theme = "bootstrap"

# Files never listed as pages in the root index or offered for the menu.
ignore = ["README.md", "navigation.md", "index.md"]

# ---------------------------------------------------------------------------
# Viewer download
# ---------------------------------------------------------------------------
[viewer]
url = "https://github.com/Dynalon/mdwiki/releases/download/0.6.2/mdwiki-0.6.2.zip"

# File extracted from the archive's top-level directory ...
asset = "mdwiki.html"
# ... and the name it is installed under in the wiki root.
entry_file = "index.html"

# If any of these exists in the wiki root (or "<title>.html"), the download
# is skipped.
filenames = ["mdwiki.html", "mdwiki-slim.html", "mdwiki-debug.html", "index.html"]

# HTTP timeout in seconds.
timeout_secs = 10

# ---------------------------------------------------------------------------
# config.json options (written once, if config.json does not exist)
# ---------------------------------------------------------------------------
[site]
use_side_menu = true
line_breaks = "gfm"
additional_footer_text = ""
anchor_character = "&#x2693;"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for the Markdown scan.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
