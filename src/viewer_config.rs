//! The viewer's `config.json`.
//!
//! A fixed-shape JSON object: the static options from `[site]` plus the wiki
//! title. Written once, only if the file does not exist yet; nothing in the
//! generator reads it back.

use crate::config::WikiConfig;
use crate::wiki::WikiError;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const VIEWER_CONFIG_FILENAME: &str = "config.json";

/// The JSON document as the viewer expects it (camelCase keys).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerSettings<'a> {
    pub use_side_menu: bool,
    pub line_breaks: &'a str,
    pub additional_footer_text: &'a str,
    pub anchor_character: &'a str,
    pub title: &'a str,
}

impl<'a> ViewerSettings<'a> {
    pub fn from_config(config: &'a WikiConfig) -> Self {
        Self {
            use_side_menu: config.site.use_side_menu,
            line_breaks: &config.site.line_breaks,
            additional_footer_text: &config.site.additional_footer_text,
            anchor_character: &config.site.anchor_character,
            title: &config.title,
        }
    }
}

pub fn render_viewer_config(config: &WikiConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ViewerSettings::from_config(config))
}

/// Write `config.json` into `root` unless it already exists.
///
/// Returns whether a file was written.
pub fn write_viewer_config(root: &Path, config: &WikiConfig) -> Result<bool, WikiError> {
    let path = root.join(VIEWER_CONFIG_FILENAME);
    if path.exists() {
        return Ok(false);
    }
    fs::write(&path, render_viewer_config(config)?)?;
    Ok(true)
}
