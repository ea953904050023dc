//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 Notes
//!     Source: notes/
//!     001 Deep
//!         Source: notes/deep/ (has index)
//!
//! Menu candidates
//!     Notes → notes/index.md
//!     Faq → faq.md
//!
//! Files
//!     index.md: will be created
//!     config.json: present
//!     navigation.md: will be created
//! ```
//!
//! ## Build
//!
//! ```text
//! [Info] Created index.md (My Wiki)
//! [Info] Created notes/index.md (Notes)
//! [Info] Created config.json. Please review settings.
//! [Info] Created navigation.md (2 entries)
//! Generated 2 index files
//! ```

use crate::index::INDEX_FILENAME;
use crate::install::{InstallError, InstallOutcome};
use crate::naming::page_title;
use crate::navigation::NAVIGATION_FILENAME;
use crate::viewer_config::VIEWER_CONFIG_FILENAME;
use crate::wiki::{BuildReport, WikiEvent, WikiPlan};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn presence(exists: bool) -> &'static str {
    if exists { "present" } else { "will be created" }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

// ============================================================================
// Check
// ============================================================================

/// Render a plan as a section tree, menu candidates, and root file status.
///
/// Sections are numbered by position among their siblings.
pub fn format_plan(plan: &WikiPlan) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];

    if plan.sections.is_empty() {
        lines.push("    (none)".to_string());
    }

    push_section_tree(plan, "", 0, &mut lines);

    lines.push(String::new());
    lines.push("Menu candidates".to_string());
    if plan.has_navigation {
        lines.push(format!("    ({NAVIGATION_FILENAME} exists, no questions will be asked)"));
    } else {
        for section in plan.top_level() {
            lines.push(format!(
                "    {} → {}/{INDEX_FILENAME}",
                section.title(),
                section.name
            ));
        }
        for page in &plan.root_pages {
            lines.push(format!("    {} → {}", page_title(page), page));
        }
    }

    lines.push(String::new());
    lines.push("Files".to_string());
    lines.push(format!("    {INDEX_FILENAME}: {}", presence(plan.has_root_index)));
    lines.push(format!(
        "    {VIEWER_CONFIG_FILENAME}: {}",
        presence(plan.has_viewer_config)
    ));
    lines.push(format!(
        "    {NAVIGATION_FILENAME}: {}",
        presence(plan.has_navigation)
    ));

    lines
}

/// Sections are stored level-by-level; print them as a tree by following
/// parent paths.
fn push_section_tree(plan: &WikiPlan, parent: &str, depth: usize, lines: &mut Vec<String>) {
    let children = plan
        .sections
        .iter()
        .filter(|s| s.depth == depth + 1 && parent_of(&s.rel_path) == parent);
    for (i, section) in children.enumerate() {
        let base = indent(depth);
        lines.push(format!("{}{} {}", base, format_index(i + 1), section.title()));
        let marker = if section.has_index { " (has index)" } else { "" };
        lines.push(format!("{}    Source: {}/{}", base, section.rel_path, marker));
        push_section_tree(plan, &section.rel_path, depth + 1, lines);
    }
}

fn parent_of(rel_path: &str) -> &str {
    rel_path.rsplit_once('/').map(|(p, _)| p).unwrap_or("")
}

/// Print plan output to stdout.
pub fn print_plan(plan: &WikiPlan) {
    for line in format_plan(plan) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_event(event: &WikiEvent) -> String {
    match event {
        WikiEvent::IndexCreated { rel_path, title } if rel_path.is_empty() => {
            format!("[Info] Created {INDEX_FILENAME} ({title})")
        }
        WikiEvent::IndexCreated { rel_path, title } => {
            format!("[Info] Created {rel_path}/{INDEX_FILENAME} ({title})")
        }
        WikiEvent::ViewerConfigCreated => {
            format!("[Info] Created {VIEWER_CONFIG_FILENAME}. Please review settings.")
        }
        WikiEvent::NavigationCreated { entries } => format!(
            "[Info] Created {NAVIGATION_FILENAME} ({})",
            plural(*entries, "entry", "entries")
        ),
        WikiEvent::NavigationKept => {
            format!("[Info] {NAVIGATION_FILENAME} exists, menu left unchanged")
        }
    }
}

pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines: Vec<String> = report.events.iter().map(format_build_event).collect();
    lines.push(format!(
        "Generated {}",
        plural(report.indexes_created(), "index file", "index files")
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Viewer install
// ============================================================================

/// One line describing the install step. Failures are warnings.
pub fn format_install_result(result: &Result<InstallOutcome, InstallError>) -> String {
    match result {
        Ok(InstallOutcome::AlreadyInstalled(name)) => {
            format!("[Info] Viewer already installed ({name})")
        }
        Ok(InstallOutcome::Installed {
            entry_file,
            reused_archive: true,
        }) => format!("[Info] Installed viewer as {entry_file} from existing archive"),
        Ok(InstallOutcome::Installed { entry_file, .. }) => {
            format!("[Info] Downloaded and installed viewer as {entry_file}")
        }
        Err(e) => format!("Warning: viewer not installed: {e}"),
    }
}
