//! The root `navigation.md` menu.
//!
//! One link per accepted entry, in the order they were collected, followed by
//! the theme directives the viewer understands:
//!
//! ```text
//! # My Wiki
//!
//! [Projects](projects/index.md)
//! [Faq](faq.md)
//!
//! [gimmick:Theme (inverse: false)](bootstrap)
//! [gimmick:ThemeChooser](Change theme)
//! ```
//!
//! Entries are never sorted: menu order is traversal order.

pub const NAVIGATION_FILENAME: &str = "navigation.md";

/// One clickable item in the top-level menu.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationEntry {
    pub title: String,
    pub target: String,
}

impl NavigationEntry {
    pub fn new(title: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            target: target.into(),
        }
    }

    pub fn to_markdown(&self) -> String {
        format!("[{}]({})", self.title, self.target)
    }
}

/// Render the navigation document. Pure; the caller decides whether to write.
pub fn render_navigation(entries: &[NavigationEntry], title: &str, theme: &str) -> String {
    let mut out = format!("# {title}\n\n");
    for entry in entries {
        out.push_str(&entry.to_markdown());
        out.push('\n');
    }
    out.push_str(&format!("\n[gimmick:Theme (inverse: false)]({theme})\n"));
    out.push_str("[gimmick:ThemeChooser](Change theme)");
    out
}
