//! Shared test utilities for the mdwikify test suite.
//!
//! Builds throwaway wiki trees from a compact path list and provides a
//! scripted stand-in for the operator.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_tree(tmp.path(), &["a.md", "notes/b.md", "empty/"]);
//!
//! let mut prompter = ScriptedPrompter::new(&["y", "n"]);
//! ```

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use crate::prompt::{Prompter, parse_yes_no};

// =========================================================================
// Tree setup
// =========================================================================

/// Create files (and their parent directories) under `root`.
///
/// Entries ending in `/` create an empty directory. Files get a one-line
/// Markdown body so they are distinguishable from generated output.
pub fn write_tree(root: &Path, entries: &[&str]) {
    for entry in entries {
        let path = root.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, format!("# {entry}\n")).unwrap();
        }
    }
}

/// Read a generated file, panicking with the path on failure.
pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

// =========================================================================
// Scripted operator
// =========================================================================

/// Answers prompts from a fixed script and records every question asked.
///
/// Running out of answers is treated as blank input, i.e. the default.
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }

    fn next(&mut self, question: &str) -> String {
        self.asked.push(question.to_string());
        self.answers.pop_front().unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_yes_no(&mut self, question: &str) -> std::io::Result<bool> {
        let answer = self.next(question);
        Ok(parse_yes_no(&answer))
    }

    fn ask_string(&mut self, question: &str) -> std::io::Result<String> {
        Ok(self.next(question))
    }
}
