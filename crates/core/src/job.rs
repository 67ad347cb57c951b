// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobs: append-only ordered lists of steps.

use crate::step::{Step, StepError};

/// One coherent multi-step task. Steps run in the order they were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Job {
    name: String,
    steps: Vec<Step>,
}

impl Job {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), steps: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a step to the end of the job.
    pub fn push(&mut self, step: Step) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// Append a step written in `IN:`/`OUT:` marker form.
    pub fn push_parsed(&mut self, text: &str) -> Result<&mut Self, StepError> {
        let step = Step::parse(text)?;
        Ok(self.push(step))
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Extend<Step> for Job {
    fn extend<T: IntoIterator<Item = Step>>(&mut self, iter: T) {
        self.steps.extend(iter);
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
