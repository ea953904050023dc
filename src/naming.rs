//! Display titles derived from filesystem names.
//!
//! Every link text the wiki shows comes from a file or directory name. The
//! conversion is the same for all of them:
//!
//! - underscores become spaces
//! - each whitespace-delimited word gets an uppercase first letter, the rest
//!   lowercase
//!
//! Examples:
//! - `my_page` → "My Page"
//! - `release_NOTES` → "Release Notes"
//! - `getting-started` → "Getting-started" (dashes are not word breaks)

use std::path::Path;

/// Convert a file or directory name into a human-readable title.
///
/// Total over any input; an empty name yields an empty title. Whitespace runs
/// are preserved as-is.
pub fn titlify(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars().map(|c| if c == '_' { ' ' } else { c }) {
        if c.is_whitespace() {
            at_word_start = true;
            title.push(c);
        } else if at_word_start {
            at_word_start = false;
            title.extend(c.to_uppercase());
        } else {
            title.extend(c.to_lowercase());
        }
    }
    title
}

/// Title for a Markdown page: the file stem, titlified.
///
/// `a.md` → "A", `meeting_notes.md` → "Meeting Notes".
pub fn page_title(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    titlify(&stem)
}

/// Last path component as a lossy string, or empty for roots like `/` or `.`.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
