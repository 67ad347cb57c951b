// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step descriptors: one shell command plus the files it reads and writes.
//!
//! A step's command is kept as a sequence of [`Segment`]s so that declared
//! files stay typed all the way to rendering. The runner only ever looks at
//! the declared input and output lists; it never inspects the command text.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// `IN:<path>` / `OUT:<path>` markers at the start of a shell word.
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[\s(<>|;&])(IN|OUT):([^\s()<>|;&]+)").expect("constant regex pattern is valid")
});

/// Errors from building a step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("step command is empty")]
    EmptyCommand,
}

/// One piece of a step's command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Shell text emitted verbatim.
    Text(String),
    /// A declared input file, shell-quoted when rendered.
    Input(PathBuf),
    /// A declared output file, shell-quoted when rendered.
    Output(PathBuf),
}

/// An immutable unit of work: a shell command and its declared files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    label: Option<String>,
    segments: Vec<Segment>,
    inputs: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
}

impl Step {
    pub fn builder() -> StepBuilder {
        StepBuilder::default()
    }

    /// Build a step from marker text.
    ///
    /// Words prefixed with `IN:` or `OUT:` are declared as inputs or outputs;
    /// the prefix is dropped from the rendered command.
    ///
    /// ```ignore
    /// let step = Step::parse("python -u IN:dedup.py < IN:sorted.tsv > OUT:dedup.tsv")?;
    /// assert_eq!(step.render(), "python -u dedup.py < sorted.tsv > dedup.tsv");
    /// ```
    pub fn parse(text: &str) -> Result<Step, StepError> {
        StepBuilder::from_markers(text).build()
    }

    /// Short name used in logs: the explicit label, or the program name.
    pub fn label(&self) -> Cow<'_, str> {
        if let Some(label) = &self.label {
            return Cow::Borrowed(label);
        }
        let rendered = self.render();
        let program = rendered
            .split_whitespace()
            .map(|word| word.trim_start_matches('('))
            .find(|word| !word.is_empty())
            .unwrap_or_default();
        Cow::Owned(program.to_string())
    }

    /// Declared inputs in declaration order, without duplicates.
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Declared outputs in declaration order, without duplicates.
    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    /// Render the command text handed to the shell.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Input(path) | Segment::Output(path) => {
                    out.push_str(&quote_path(path));
                }
            }
        }
        out
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Builder for [`Step`].
///
/// Each `arg`/`raw`/`input`/`output` call appends one space-separated word
/// (or fragment) to the command.
#[derive(Debug, Clone, Default)]
pub struct StepBuilder {
    label: Option<String>,
    segments: Vec<Segment>,
    inputs: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
}

impl StepBuilder {
    /// Seed a builder from marker text (see [`Step::parse`]).
    pub fn from_markers(text: &str) -> StepBuilder {
        let mut builder = StepBuilder::default();
        let mut last = 0;
        for caps in MARKER_PATTERN.captures_iter(text) {
            let (Some(lead), Some(kind), Some(path)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            builder.push_text(&text[last..lead.end()]);
            builder.push_text(path.as_str());
            let path = PathBuf::from(path.as_str());
            if kind.as_str() == "IN" {
                push_unique(&mut builder.inputs, path);
            } else {
                push_unique(&mut builder.outputs, path);
            }
            last = caps.get(0).map_or(last, |m| m.end());
        }
        builder.push_text(&text[last..]);
        builder
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Append a literal argument, shell-quoted if needed.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.separate();
        let quoted = quote(arg.as_ref()).into_owned();
        self.push_text(&quoted);
        self
    }

    /// Append shell text verbatim (operators, redirections, subshells).
    pub fn raw(mut self, text: impl AsRef<str>) -> Self {
        self.separate();
        self.push_text(text.as_ref());
        self
    }

    /// Append a declared input file to the command.
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.separate();
        self.segments.push(Segment::Input(path.clone()));
        push_unique(&mut self.inputs, path);
        self
    }

    /// Append a declared output file to the command.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.separate();
        self.segments.push(Segment::Output(path.clone()));
        push_unique(&mut self.outputs, path);
        self
    }

    /// Declare an input that does not appear in the command text.
    pub fn extra_input(mut self, path: impl Into<PathBuf>) -> Self {
        push_unique(&mut self.inputs, path.into());
        self
    }

    /// Declare an output that does not appear in the command text.
    pub fn extra_output(mut self, path: impl Into<PathBuf>) -> Self {
        push_unique(&mut self.outputs, path.into());
        self
    }

    pub fn extra_inputs<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths.into_iter().fold(self, |b, p| b.extra_input(p))
    }

    pub fn extra_outputs<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths.into_iter().fold(self, |b, p| b.extra_output(p))
    }

    pub fn build(self) -> Result<Step, StepError> {
        let step = Step {
            label: self.label,
            segments: self.segments,
            inputs: self.inputs,
            outputs: self.outputs,
        };
        if step.render().trim().is_empty() {
            return Err(StepError::EmptyCommand);
        }
        Ok(step)
    }

    fn separate(&mut self) {
        if !self.segments.is_empty() {
            self.push_text(" ");
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Text(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Text(text.to_string()));
        }
    }
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '=' | '@' | '%' | '+' | ',')
}

/// Quote a word for the shell, leaving plain words untouched.
///
/// Uses single quotes, embedding literal single quotes with the `'\''` idiom.
pub fn quote(word: &str) -> Cow<'_, str> {
    if !word.is_empty() && word.chars().all(is_shell_safe) {
        return Cow::Borrowed(word);
    }
    Cow::Owned(format!("'{}'", word.replace('\'', "'\\''")))
}

fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy()).into_owned()
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
