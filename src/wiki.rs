//! Tree walking and navigation building.
//!
//! Generation happens in two phases:
//!
//! ```text
//! 1. Plan    wiki root  →  WikiPlan      (read-only: sections, menu candidates)
//! 2. Apply   WikiPlan   →  files written (indexes, config.json, navigation.md)
//! ```
//!
//! Planning walks the tree once and records every *wiki section* (a directory
//! with Markdown somewhere beneath it) in walk order, plus the root Markdown
//! files that could go in the menu. Directories without Markdown are pruned:
//! they get no index, are not descended into, and are never offered for the
//! menu.
//!
//! Applying performs the writes and asks the operator the menu questions.
//!
//! ## Walk Order
//!
//! The walk is top-down, level by level within each directory: all qualifying
//! children of a directory are visited (in filesystem enumeration order)
//! before descending into the first of them. Menu entries therefore appear in
//! enumeration order, **not** sorted. Sorting only happens inside each
//! `index.md`.
//!
//! Symlinked directories are not followed, so they never become sections or
//! menu entries.
//!
//! ## Write-Once Artifacts
//!
//! Every generated file is written only if it does not exist yet. Existing
//! files are never merged into or regenerated, so running twice is a no-op
//! the second time. In particular an existing `navigation.md` suppresses all
//! menu questions.
//!
//! ## Failures
//!
//! Any read or write error aborts the run.

use crate::classify::{ClassifyError, classify_dirs, is_markdown_file};
use crate::config::WikiConfig;
use crate::index::{INDEX_FILENAME, generate_index};
use crate::naming::{page_title, titlify};
use crate::navigation::{NAVIGATION_FILENAME, NavigationEntry, render_navigation};
use crate::prompt::Prompter;
use crate::viewer_config::{VIEWER_CONFIG_FILENAME, write_viewer_config};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Prompt failed: {0}")]
    Prompt(std::io::Error),
}

/// A directory that contains Markdown somewhere beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct WikiSection {
    /// Filesystem path (root-joined).
    pub path: PathBuf,
    /// Path relative to the wiki root, `/`-separated.
    pub rel_path: String,
    /// Directory name.
    pub name: String,
    /// 1 for direct children of the root.
    pub depth: usize,
    /// Whether an `index.md` already existed when the plan was made.
    pub has_index: bool,
}

impl WikiSection {
    pub fn title(&self) -> String {
        titlify(&self.name)
    }
}

/// Everything the apply phase needs, gathered without side effects.
#[derive(Debug, Clone)]
pub struct WikiPlan {
    pub root: PathBuf,
    pub has_root_index: bool,
    pub has_viewer_config: bool,
    pub has_navigation: bool,
    /// Wiki sections in walk order.
    pub sections: Vec<WikiSection>,
    /// Root Markdown files eligible for the menu, in enumeration order.
    pub root_pages: Vec<String>,
}

impl WikiPlan {
    /// Sections directly below the root, in walk order.
    pub fn top_level(&self) -> impl Iterator<Item = &WikiSection> {
        self.sections.iter().filter(|s| s.depth == 1)
    }
}

/// Something the apply phase did.
#[derive(Debug, Clone, PartialEq)]
pub enum WikiEvent {
    /// An `index.md` was written. `rel_path` is the directory, empty for the root.
    IndexCreated { rel_path: String, title: String },
    ViewerConfigCreated,
    NavigationCreated { entries: usize },
    /// `navigation.md` already existed; no menu questions were asked.
    NavigationKept,
}

/// Ordered record of what a run changed.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub events: Vec<WikiEvent>,
}

impl BuildReport {
    pub fn indexes_created(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, WikiEvent::IndexCreated { .. }))
            .count()
    }
}

// =============================================================================
// Planning
// =============================================================================

/// Walk the tree rooted at `root` and record what would be generated.
pub fn plan_wiki(root: &Path, config: &WikiConfig) -> Result<WikiPlan, WikiError> {
    if !root.is_dir() {
        return Err(ClassifyError::NotADirectory(root.to_path_buf()).into());
    }

    let mut sections = Vec::new();
    collect_sections(root, "", 0, &mut sections)?;

    Ok(WikiPlan {
        root: root.to_path_buf(),
        has_root_index: root.join(INDEX_FILENAME).exists(),
        has_viewer_config: root.join(VIEWER_CONFIG_FILENAME).exists(),
        has_navigation: root.join(NAVIGATION_FILENAME).exists(),
        sections,
        root_pages: list_root_pages(root, config)?,
    })
}

/// Record the qualifying children of `dir`, then descend into each of them.
///
/// Symlinked directories are not followed.
fn collect_sections(
    dir: &Path,
    rel: &str,
    depth: usize,
    sections: &mut Vec<WikiSection>,
) -> Result<(), WikiError> {
    let mut children: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            children.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }

    let paths: Vec<PathBuf> = children.iter().map(|(_, p)| p.clone()).collect();
    let qualifying: Vec<(String, PathBuf)> = children
        .into_iter()
        .zip(classify_dirs(&paths)?)
        .filter_map(|(child, is_section)| is_section.then_some(child))
        .collect();

    let first = sections.len();
    for (name, path) in qualifying {
        let rel_path = if rel.is_empty() {
            name.clone()
        } else {
            format!("{rel}/{name}")
        };
        sections.push(WikiSection {
            has_index: path.join(INDEX_FILENAME).exists(),
            path,
            rel_path,
            name,
            depth: depth + 1,
        });
    }

    let level: Vec<(PathBuf, String)> = sections[first..]
        .iter()
        .map(|s| (s.path.clone(), s.rel_path.clone()))
        .collect();
    for (path, rel_path) in level {
        collect_sections(&path, &rel_path, depth + 1, sections)?;
    }
    Ok(())
}

/// Root Markdown files not in the combined ignore set, in enumeration order.
fn list_root_pages(root: &Path, config: &WikiConfig) -> Result<Vec<String>, WikiError> {
    let ignore = config.navigation_ignore();
    let mut pages = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_markdown_file(&entry.path()) && !ignore.contains(&name) {
            pages.push(name);
        }
    }
    Ok(pages)
}

// =============================================================================
// Applying
// =============================================================================

/// Write every missing index: the root's, then each section's.
///
/// No questions are asked and no other files are touched.
pub fn generate_indexes(plan: &WikiPlan, config: &WikiConfig) -> Result<BuildReport, WikiError> {
    let mut report = BuildReport::default();
    create_root_index(plan, config, &mut report)?;
    for section in &plan.sections {
        create_section_index(section, &mut report)?;
    }
    Ok(report)
}

/// Full run: root index, `config.json`, section indexes and the menu.
///
/// Menu questions are only asked when `navigation.md` does not exist. Each
/// top-level section is offered before its index is written; root Markdown
/// files are offered after the walk.
pub fn build_wiki(
    plan: &WikiPlan,
    config: &WikiConfig,
    prompter: &mut dyn Prompter,
) -> Result<BuildReport, WikiError> {
    let mut report = BuildReport::default();

    create_root_index(plan, config, &mut report)?;
    if write_viewer_config(&plan.root, config)? {
        report.events.push(WikiEvent::ViewerConfigCreated);
    }

    if plan.root.join(NAVIGATION_FILENAME).exists() {
        for section in &plan.sections {
            create_section_index(section, &mut report)?;
        }
        report.events.push(WikiEvent::NavigationKept);
        return Ok(report);
    }

    let mut entries = Vec::new();
    for section in &plan.sections {
        if section.depth == 1 {
            let question = format!("Add directory {} as Menu item in Nav panel?", section.name);
            if ask_yes_no(prompter, &question)? {
                entries.push(NavigationEntry::new(
                    section.title(),
                    format!("{}/{INDEX_FILENAME}", section.name),
                ));
            }
        }
        create_section_index(section, &mut report)?;
    }

    for page in &plan.root_pages {
        if !ask_yes_no(prompter, &format!("Add {page} as Link in Nav panel?"))? {
            continue;
        }
        let mut title = page_title(page);
        if !ask_yes_no(prompter, &format!("Is name \"{title}\" OK?"))? {
            let answer = prompter.ask_string("Enter name").map_err(WikiError::Prompt)?;
            if !answer.trim().is_empty() {
                title = answer.trim().to_string();
            }
        }
        entries.push(NavigationEntry::new(title, page.clone()));
    }

    let text = render_navigation(&entries, &config.title, &config.theme);
    fs::write(plan.root.join(NAVIGATION_FILENAME), text)?;
    report.events.push(WikiEvent::NavigationCreated {
        entries: entries.len(),
    });
    Ok(report)
}

fn ask_yes_no(prompter: &mut dyn Prompter, question: &str) -> Result<bool, WikiError> {
    prompter.ask_yes_no(question).map_err(WikiError::Prompt)
}

fn create_root_index(
    plan: &WikiPlan,
    config: &WikiConfig,
    report: &mut BuildReport,
) -> Result<(), WikiError> {
    if plan.root.join(INDEX_FILENAME).exists() {
        return Ok(());
    }
    let doc = generate_index(&plan.root, Some(&config.title), &config.ignore)?;
    report.events.push(WikiEvent::IndexCreated {
        rel_path: String::new(),
        title: doc.title,
    });
    Ok(())
}

fn create_section_index(section: &WikiSection, report: &mut BuildReport) -> Result<(), WikiError> {
    if section.path.join(INDEX_FILENAME).exists() {
        return Ok(());
    }
    let doc = generate_index(&section.path, Some(&section.title()), &[])?;
    report.events.push(WikiEvent::IndexCreated {
        rel_path: section.rel_path.clone(),
        title: doc.title,
    });
    Ok(())
}
