//! Operator confirmation.
//!
//! The walker never talks to the terminal directly. It asks a [`Prompter`],
//! which blocks until it has an answer. The CLI plugs in a
//! [`TerminalPrompter`] (or [`AcceptAll`] for `--yes`), and tests use a
//! scripted one.

use std::io::{self, BufRead, Write};

/// Synchronous question/answer capability used by the navigation builder.
pub trait Prompter {
    /// Yes/no question. Blank input means yes.
    fn ask_yes_no(&mut self, question: &str) -> io::Result<bool>;

    /// Free-text question.
    fn ask_string(&mut self, question: &str) -> io::Result<String>;
}

/// Interpret a yes/no answer.
///
/// Blank is yes. Otherwise only the first character matters: `n`, `0` or `f`
/// (any case) is no, anything else is yes.
pub fn parse_yes_no(answer: &str) -> bool {
    match answer.trim().chars().next() {
        None => true,
        Some(c) => !matches!(c.to_ascii_lowercase(), 'n' | '0' | 'f'),
    }
}

/// Prompts on a writer and reads answers line by line from a reader.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask_yes_no(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.read_answer(&format!("{question} [Y/n] >>> "))?;
        Ok(parse_yes_no(&answer))
    }

    fn ask_string(&mut self, question: &str) -> io::Result<String> {
        self.read_answer(&format!("{question} >>> "))
    }
}

/// Answers every yes/no question with the default (yes).
///
/// Free-text questions are only asked after a "no", so this never sees one in
/// practice; it answers with an empty string if it does.
pub struct AcceptAll;

impl Prompter for AcceptAll {
    fn ask_yes_no(&mut self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }

    fn ask_string(&mut self, _question: &str) -> io::Result<String> {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn blank_is_yes() {
        assert!(parse_yes_no(""));
        assert!(parse_yes_no("   "));
    }

    #[test]
    fn negative_first_letters() {
        for answer in ["n", "No", "NOPE", "0", "false", "F"] {
            assert!(!parse_yes_no(answer), "{answer}");
        }
    }

    #[test]
    fn anything_else_is_yes() {
        for answer in ["y", "yes", "1", "sure", "t"] {
            assert!(parse_yes_no(answer), "{answer}");
        }
    }

    #[test]
    fn terminal_yes_no_writes_prompt_and_reads_line() {
        let mut out = Vec::new();
        let mut prompter = TerminalPrompter::new(Cursor::new("n\n"), &mut out);

        assert!(!prompter.ask_yes_no("Add notes?").unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "Add notes? [Y/n] >>> ");
    }

    #[test]
    fn terminal_blank_line_is_yes() {
        let mut prompter = TerminalPrompter::new(Cursor::new("\n"), Vec::new());
        assert!(prompter.ask_yes_no("Add notes?").unwrap());
    }

    #[test]
    fn terminal_string_strips_newline_only() {
        let mut prompter = TerminalPrompter::new(Cursor::new("  My Title \r\n"), Vec::new());
        assert_eq!(prompter.ask_string("Enter name").unwrap(), "  My Title ");
    }

    #[test]
    fn terminal_eof_is_error() {
        let mut prompter = TerminalPrompter::new(Cursor::new(""), Vec::new());
        let err = prompter.ask_yes_no("Add notes?").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn accept_all_says_yes() {
        assert!(AcceptAll.ask_yes_no("anything").unwrap());
    }
}
