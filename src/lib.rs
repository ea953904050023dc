//! # mdwikify
//!
//! Turn a directory of Markdown files into a browsable wiki. The files stay
//! where they are; mdwikify adds what a single-page Markdown viewer needs to
//! browse them:
//!
//! ```text
//! wiki/
//! ├── index.html          # The viewer, downloaded once
//! ├── config.json         # Viewer settings (title, side menu, ...)
//! ├── navigation.md       # Top menu: chosen sections and pages
//! ├── index.md            # Root index: categories + pages
//! ├── faq.md
//! ├── projects/
//! │   ├── index.md        # Generated for every directory with Markdown
//! │   ├── alpha.md
//! │   └── design_notes/
//! │       ├── index.md
//! │       └── storage.md
//! └── images/             # No Markdown anywhere below: left alone
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`classify`] | Is this a Markdown file? Does this directory contain Markdown (recursively)? |
//! | [`naming`] | File and directory names → display titles |
//! | [`index`] | Builds and renders one directory's `index.md` |
//! | [`navigation`] | Renders `navigation.md` |
//! | [`wiki`] | Walks the tree: plans sections, then writes indexes and asks for menu entries |
//! | [`prompt`] | Operator questions (terminal, accept-all) |
//! | [`install`] | Downloads and unpacks the viewer |
//! | [`viewer_config`] | Writes the viewer's `config.json` |
//! | [`config`] | `mdwikify.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Write Once, Never Merge
//!
//! Every generated file is written only if it is missing. Hand edits to an
//! `index.md` or `navigation.md` are never touched by later runs; delete a
//! file to have it regenerated.
//!
//! ## Plan, Then Apply
//!
//! The tree walk is read-only and produces a [`wiki::WikiPlan`]. Writes and
//! operator questions happen in a second pass over that plan, which keeps
//! the walk testable without a terminal and lets `check` show what would
//! happen.
//!
//! ## Menu Order Is Walk Order
//!
//! Directory listings inside `index.md` are sorted. The navigation menu is
//! not: it follows the order the filesystem enumerates the root.
//!
//! ## The Viewer Is Optional
//!
//! A failed download is a warning. The indexes and menu are plain Markdown
//! and are generated regardless.

pub mod classify;
pub mod config;
pub mod index;
pub mod install;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod prompt;
pub mod viewer_config;
pub mod wiki;

#[cfg(test)]
pub(crate) mod test_helpers;
