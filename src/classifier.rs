//! PAN classification.
//!
//! A cleaned value is Valid only when it has the PAN layout, contains no
//! adjacent repeated characters, and neither its letter block nor its digit
//! block is a strictly ascending run.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Rejection;
use crate::validators::{first_adjacent_repeat, is_strict_ascending_sequence, pan_format};

const LETTER_BLOCK: std::ops::Range<usize> = 0..5;
const DIGIT_BLOCK: std::ops::Range<usize> = 5..9;

/// Classification outcome for one cleaned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    Valid,
    Invalid,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Valid => "Valid",
            Status::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the adjacent-repeat rule looks for equal neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencyScope {
    /// Anywhere in the full value, including across block boundaries.
    #[default]
    WholeValue,
    /// Inside the letter block and inside the digit block only.
    PerBlock,
}

/// Which anti-pattern rules apply on top of the layout check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanRules {
    pub reject_adjacent_repeats: bool,
    pub adjacency_scope: AdjacencyScope,
    pub reject_sequential_letters: bool,
    pub reject_sequential_digits: bool,
}

impl PanRules {
    pub const STRICT: PanRules = PanRules {
        reject_adjacent_repeats: true,
        adjacency_scope: AdjacencyScope::WholeValue,
        reject_sequential_letters: true,
        reject_sequential_digits: true,
    };
}

impl Default for PanRules {
    fn default() -> Self {
        PanRules::STRICT
    }
}

/// A value that passed every rule of the classifier that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanNumber(String);

impl PanNumber {
    /// Parse an already cleaned value against the strict rules.
    ///
    /// No trimming or case folding happens here.
    pub fn parse(value: &str) -> Result<Self, Rejection> {
        PanClassifier::default().parse(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn letters(&self) -> &str {
        &self.0[LETTER_BLOCK]
    }

    pub fn digits(&self) -> &str {
        &self.0[DIGIT_BLOCK]
    }

    pub fn check_letter(&self) -> char {
        char::from(self.0.as_bytes()[9])
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for PanNumber {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanNumber::parse(s)
    }
}

impl fmt::Display for PanNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PanNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A cleaned value paired with its status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassificationResult {
    pub value: String,
    pub status: Status,
    /// Set iff `status` is Invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Rejection>,
}

impl ClassificationResult {
    pub fn is_valid(&self) -> bool {
        self.status == Status::Valid
    }
}

/// Stateless PAN classifier.
///
/// Total over all strings: malformed input is Invalid, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanClassifier {
    rules: PanRules,
}

impl PanClassifier {
    pub fn new(rules: PanRules) -> Self {
        PanClassifier { rules }
    }

    pub fn rules(&self) -> &PanRules {
        &self.rules
    }

    /// Run every rule in order and report the first failure.
    pub fn check(&self, value: &str) -> Result<(), Rejection> {
        if !pan_format(value) {
            return Err(Rejection::Format);
        }

        // The layout matched, so the value is 10 ASCII bytes and slicing is safe.
        let letters = &value[LETTER_BLOCK];
        let digits = &value[DIGIT_BLOCK];

        if self.rules.reject_adjacent_repeats {
            let repeat = match self.rules.adjacency_scope {
                AdjacencyScope::WholeValue => first_adjacent_repeat(value),
                AdjacencyScope::PerBlock => first_adjacent_repeat(letters).or_else(|| {
                    first_adjacent_repeat(digits).map(|(i, ch)| (i + DIGIT_BLOCK.start, ch))
                }),
            };
            if let Some((index, ch)) = repeat {
                return Err(Rejection::AdjacentRepeat { index, ch });
            }
        }

        if self.rules.reject_sequential_letters && is_strict_ascending_sequence(letters) {
            return Err(Rejection::SequentialLetters);
        }

        if self.rules.reject_sequential_digits && is_strict_ascending_sequence(digits) {
            return Err(Rejection::SequentialDigits);
        }

        Ok(())
    }

    pub fn parse(&self, value: &str) -> Result<PanNumber, Rejection> {
        self.check(value).map(|()| PanNumber(value.to_string()))
    }

    pub fn classify(&self, value: &str) -> Status {
        match self.check(value) {
            Ok(()) => Status::Valid,
            Err(_) => Status::Invalid,
        }
    }

    /// Classify one value, keeping the rejection reason.
    pub fn classify_value(&self, value: impl Into<String>) -> ClassificationResult {
        let value = value.into();
        let reason = self.check(&value).err();
        let status = if reason.is_none() {
            Status::Valid
        } else {
            Status::Invalid
        };
        ClassificationResult {
            value,
            status,
            reason,
        }
    }

    /// Classify many values in parallel via Rayon.
    ///
    /// Results are returned in input order.
    pub fn classify_batch<S>(&self, values: &[S]) -> Vec<ClassificationResult>
    where
        S: AsRef<str> + Sync,
    {
        values
            .par_iter()
            .map(|v| self.classify_value(AsRef::<str>::as_ref(v)))
            .collect()
    }
}

/// Classify a cleaned value with the strict rules.
pub fn classify(value: &str) -> Status {
    PanClassifier::default().classify(value)
}
