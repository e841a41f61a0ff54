//! Progressive step reveal
//!
//! A [`StepController`] walks an ordered list of step ids. Everything up to
//! and including the current step is visible; exactly one step is current.
//! Every transition clamps into range, so there is no error path.

use std::borrow::Cow;
use std::fmt;

use crate::config::Locale;
use crate::diagram::{Diagram, StepPlan};

/// Name of one reveal step, such as `"axes"` or `"highlight"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(Cow<'static, str>);

impl StepId {
    pub const fn new(id: &'static str) -> Self {
        StepId(Cow::Borrowed(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for StepId {
    fn from(id: &'static str) -> Self {
        StepId::new(id)
    }
}

impl From<String> for StepId {
    fn from(id: String) -> Self {
        StepId(Cow::Owned(id))
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position and count for a step indicator widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepIndicator {
    /// Zero-based index of the current step
    pub current: usize,
    pub total: usize,
}

impl StepIndicator {
    /// One-based position for display; 0 when there are no steps.
    pub fn position(&self) -> usize {
        if self.total == 0 { 0 } else { self.current + 1 }
    }

    /// Localized "Step n of m" text.
    ///
    /// The locale's `step_indicator` template may use `{current}` and
    /// `{total}` placeholders.
    pub fn label(&self, locale: &dyn Locale) -> String {
        let template = locale
            .text("step_indicator")
            .unwrap_or_else(|| "Step {current} of {total}".to_string());
        template
            .replace("{current}", &self.position().to_string())
            .replace("{total}", &self.total.to_string())
    }
}

/// Reveal state over a fixed list of steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepController {
    steps: Vec<StepId>,
    current: usize,
}

impl StepController {
    /// Build from ordered ids. A repeated id keeps its first position.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StepId>,
    {
        let mut steps: Vec<StepId> = Vec::new();
        for id in ids {
            let id = id.into();
            if steps.contains(&id) {
                crate::log::warn!(step = %id, "duplicate step id ignored");
                continue;
            }
            steps.push(id);
        }
        StepController { steps, current: 0 }
    }

    /// Controller over the steps a diagram's data calls for.
    pub fn for_diagram(diagram: &Diagram) -> Self {
        Self::new(diagram.steps())
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> Option<&StepId> {
        self.steps.get(self.current)
    }

    pub fn steps(&self) -> &[StepId] {
        &self.steps
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.as_str() == id)
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    /// Revealed at or before the current step. Unknown ids are never visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.index_of(id).is_some_and(|i| i <= self.current)
    }

    /// The step being spotlighted right now.
    pub fn is_current(&self, id: &str) -> bool {
        self.index_of(id) == Some(self.current)
    }

    /// Advance one step. Returns whether the index moved.
    pub fn next(&mut self) -> bool {
        self.set(self.current + 1)
    }

    /// Go back one step. Returns whether the index moved.
    pub fn prev(&mut self) -> bool {
        self.set(self.current.saturating_sub(1))
    }

    /// Jump to `index`, clamped into range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.set(index)
    }

    /// Jump to a named step. Unknown ids leave the state alone.
    pub fn jump_to_id(&mut self, id: &str) -> bool {
        match self.index_of(id) {
            Some(index) => self.set(index),
            None => false,
        }
    }

    pub fn reset(&mut self) -> bool {
        self.set(0)
    }

    pub fn indicator(&self) -> StepIndicator {
        StepIndicator {
            current: self.current,
            total: self.steps.len(),
        }
    }

    fn set(&mut self, index: usize) -> bool {
        let index = index.min(self.steps.len().saturating_sub(1));
        if index == self.current {
            return false;
        }
        crate::log::debug!(from = self.current, to = index, "step changed");
        self.current = index;
        true
    }
}
