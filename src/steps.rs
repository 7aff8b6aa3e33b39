//! Stage letters and the requested step set.
//!
//! Membership is an explicit set over a small enum, not text matching:
//! the valid alphabet is the `Step` enum itself. No letter implies any
//! other - an operator may request only `P` to re-run processing against
//! resources that already exist, relying on deterministic naming.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ConfigError;

/// One of the six deployment stages, executed in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Common,
    Ingestion,
    Processing,
    Test,
    Metrics,
    Verify,
}

impl Step {
    /// Pipeline order: C, I, P, T, M, V. Never reordered.
    pub const ALL: [Step; 6] = [
        Step::Common,
        Step::Ingestion,
        Step::Processing,
        Step::Test,
        Step::Metrics,
        Step::Verify,
    ];

    pub fn letter(self) -> char {
        match self {
            Step::Common => 'C',
            Step::Ingestion => 'I',
            Step::Processing => 'P',
            Step::Test => 'T',
            Step::Metrics => 'M',
            Step::Verify => 'V',
        }
    }

    /// Case-insensitive reverse of [`Step::letter`].
    pub fn from_letter(letter: char) -> Option<Step> {
        match letter.to_ascii_uppercase() {
            'C' => Some(Step::Common),
            'I' => Some(Step::Ingestion),
            'P' => Some(Step::Processing),
            'T' => Some(Step::Test),
            'M' => Some(Step::Metrics),
            'V' => Some(Step::Verify),
            _ => None,
        }
    }

    /// Human label used in progress output and the run log.
    pub fn label(self) -> &'static str {
        match self {
            Step::Common => "common resources",
            Step::Ingestion => "ingestion",
            Step::Processing => "stream processing",
            Step::Test => "test clients",
            Step::Metrics => "metrics reporting",
            Step::Verify => "verification",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The set of stages requested for a run.
///
/// Parsing accepts letters in any order and case and ignores repeats;
/// whitespace is skipped. Any other character is a fatal configuration
/// error. An empty set is valid: every stage binds its configuration and
/// none executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSet {
    mask: u8,
}

impl StepSet {
    pub fn parse(letters: &str) -> Result<StepSet, ConfigError> {
        let mut set = StepSet::default();
        for letter in letters.chars() {
            if letter.is_ascii_whitespace() {
                continue;
            }
            let step =
                Step::from_letter(letter).ok_or(ConfigError::UnknownStep { letter })?;
            set.insert(step);
        }
        Ok(set)
    }

    pub fn insert(&mut self, step: Step) {
        self.mask |= 1 << step as u8;
    }

    /// The per-stage run gate.
    pub fn contains(self, step: Step) -> bool {
        self.mask & (1 << step as u8) != 0
    }

    pub fn is_empty(self) -> bool {
        self.mask == 0
    }

    /// Member letters in pipeline order, for display.
    pub fn letters(self) -> String {
        Step::ALL
            .iter()
            .filter(|step| self.contains(**step))
            .map(|step| step.letter())
            .collect()
    }
}

impl fmt::Display for StepSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letters())
    }
}

impl Serialize for StepSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.letters())
    }
}
