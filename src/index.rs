//! Per-directory `index.md` generation.
//!
//! Every wiki section gets an index listing what is directly inside it:
//!
//! - **Categories**: child directories that are themselves wiki sections,
//!   linked to their own `index.md`
//! - **Pages**: Markdown files, linked directly
//!
//! Both groups are sorted by raw name (byte-wise, case-sensitive). When both
//! are present each gets a subheading; a lone group is listed without one, and
//! an empty group never produces a heading.
//!
//! ## Output Format
//!
//! ```text
//! # Projects
//!
//! ## Categories
//!
//! - [Alpha](alpha/index.md)
//! - [Beta Release](beta_release/index.md)
//!
//! ## Pages
//!
//! - [Overview](overview.md)
//! ```
//!
//! Writing is unconditional here. The write-once-if-absent policy belongs to
//! the caller ([`crate::wiki`]).

use crate::classify::{ClassifyError, classify_dirs, is_markdown_file};
use crate::naming::{base_name, page_title, titlify};
use crate::wiki::WikiError;
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_FILENAME: &str = "index.md";

/// One `- [title](target)` line.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexLink {
    pub title: String,
    pub target: String,
}

/// A rendered-to-be index: heading plus the two sorted link groups.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocument {
    pub title: String,
    pub categories: Vec<IndexLink>,
    pub pages: Vec<IndexLink>,
}

impl IndexDocument {
    pub fn render(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);
        let both = !self.categories.is_empty() && !self.pages.is_empty();

        if both {
            out.push_str("## Categories\n\n");
        }
        push_links(&mut out, &self.categories);
        if both {
            out.push_str("\n## Pages\n\n");
        }
        push_links(&mut out, &self.pages);
        out
    }
}

fn push_links(out: &mut String, links: &[IndexLink]) {
    for link in links {
        out.push_str(&format!("- [{}]({})\n", link.title, link.target));
    }
}

/// Build the index for `dir` without writing anything.
///
/// - `title` defaults to the titlified directory name.
/// - Children whose name is in `ignore` are never listed.
pub fn build_index(
    dir: &Path,
    title: Option<&str>,
    ignore: &[String],
) -> Result<IndexDocument, ClassifyError> {
    if !dir.is_dir() {
        return Err(ClassifyError::NotADirectory(dir.to_path_buf()));
    }

    let mut candidate_dirs: Vec<(String, PathBuf)> = Vec::new();
    let mut page_names: Vec<String> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = base_name(&path);
        if ignore.contains(&name) {
            continue;
        }
        // Symlinked directories are not followed, matching the tree walk.
        if entry.file_type()?.is_dir() {
            candidate_dirs.push((name, path));
        } else if is_markdown_file(&path) {
            page_names.push(name);
        }
    }

    let paths: Vec<PathBuf> = candidate_dirs.iter().map(|(_, p)| p.clone()).collect();
    let is_section = classify_dirs(&paths)?;
    let mut category_names: Vec<String> = candidate_dirs
        .into_iter()
        .zip(is_section)
        .filter_map(|((name, _), keep)| keep.then_some(name))
        .collect();

    category_names.sort();
    page_names.sort();

    let title = match title {
        Some(t) => t.to_string(),
        None => titlify(&base_name(dir)),
    };

    Ok(IndexDocument {
        title,
        categories: category_names
            .into_iter()
            .map(|name| IndexLink {
                title: titlify(&name),
                target: format!("{name}/{INDEX_FILENAME}"),
            })
            .collect(),
        pages: page_names
            .into_iter()
            .map(|name| IndexLink {
                title: page_title(&name),
                target: name,
            })
            .collect(),
    })
}

/// Build the index for `dir` and write it to `dir/index.md`.
///
/// Overwrites whatever is there; callers check for an existing index first.
pub fn generate_index(
    dir: &Path,
    title: Option<&str>,
    ignore: &[String],
) -> Result<IndexDocument, WikiError> {
    let doc = build_index(dir, title, ignore)?;
    fs::write(dir.join(INDEX_FILENAME), doc.render())?;
    Ok(doc)
}
