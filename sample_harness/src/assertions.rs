//! Assertion-framework collaborator and a recording implementation.
//!
//! The traversal never decides pass or fail on its own: it opens groups and
//! hands finished case outcomes to an [`AssertionRegistry`]. Test runners
//! plug their own registry in; [`RecordingRegistry`] keeps the ordered
//! registration stream for reports and tests.

use thiserror::Error;

/// Failure reported by a sample assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
}

impl AssertionFailure {
    /// Creates a failure carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of one assertion case.
pub type CaseResult = Result<(), AssertionFailure>;

/// Receiver of test groups and cases.
pub trait AssertionRegistry {
    /// Opens a group called `title`, runs `body` inside it, then closes it.
    fn register_group(&mut self, title: &str, body: &mut dyn FnMut(&mut dyn AssertionRegistry));

    /// Records the outcome of the case `title` for `attribute`.
    fn register_case(&mut self, title: &str, attribute: &str, outcome: CaseResult);
}

/// Event in a recorded registration stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// A group was opened.
    GroupStart {
        /// Group title.
        title: String,
    },
    /// The innermost open group was closed.
    GroupEnd {
        /// Group title.
        title: String,
    },
    /// A case finished.
    Case {
        /// Titles of the enclosing groups, outermost first.
        groups: Vec<String>,
        /// Case title.
        title: String,
        /// Attribute the case belongs to.
        attribute: String,
        /// Case outcome.
        outcome: CaseResult,
    },
}

/// Registry that records every registration in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingRegistry {
    events: Vec<Registration>,
    open: Vec<String>,
}

impl RecordingRegistry {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every registration, in order.
    #[must_use]
    pub fn events(&self) -> &[Registration] {
        &self.events
    }

    /// Titles of every opened group, in order.
    #[must_use]
    pub fn group_titles(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Registration::GroupStart { title } => Some(title.as_str()),
                Registration::GroupEnd { .. } | Registration::Case { .. } => None,
            })
            .collect()
    }

    /// Titles of every recorded case, in order.
    #[must_use]
    pub fn case_titles(&self) -> Vec<&str> {
        self.cases().map(|(title, _)| title).collect()
    }

    /// Failed cases as `(title, failure)` pairs.
    #[must_use]
    pub fn failures(&self) -> Vec<(&str, &AssertionFailure)> {
        self.cases()
            .filter_map(|(title, outcome)| outcome.as_ref().err().map(|err| (title, err)))
            .collect()
    }

    /// Number of passed and failed cases.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.cases()
            .fold(Summary::default(), |mut summary, (_, outcome)| {
                if outcome.is_ok() {
                    summary.passed += 1;
                } else {
                    summary.failed += 1;
                }
                summary
            })
    }

    fn cases(&self) -> impl Iterator<Item = (&str, &CaseResult)> {
        self.events.iter().filter_map(|event| match event {
            Registration::Case { title, outcome, .. } => Some((title.as_str(), outcome)),
            Registration::GroupStart { .. } | Registration::GroupEnd { .. } => None,
        })
    }
}

impl AssertionRegistry for RecordingRegistry {
    fn register_group(&mut self, title: &str, body: &mut dyn FnMut(&mut dyn AssertionRegistry)) {
        self.events.push(Registration::GroupStart {
            title: title.to_owned(),
        });
        self.open.push(title.to_owned());
        body(self);
        self.open.pop();
        self.events.push(Registration::GroupEnd {
            title: title.to_owned(),
        });
    }

    fn register_case(&mut self, title: &str, attribute: &str, outcome: CaseResult) {
        self.events.push(Registration::Case {
            groups: self.open.clone(),
            title: title.to_owned(),
            attribute: attribute.to_owned(),
            outcome,
        });
    }
}

/// Passed and failed case counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Cases that passed.
    pub passed: usize,
    /// Cases that failed.
    pub failed: usize,
}
