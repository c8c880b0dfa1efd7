//! Cleaning and batch classification of raw PAN records.
//!
//! Raw values are trimmed and uppercased, null/blank values are dropped,
//! duplicates collapse to one cleaned value, and each distinct value is
//! classified once.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::classifier::{ClassificationResult, PanClassifier, Status};

/// Distinct-value count at which classification moves onto the Rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Trim and uppercase one raw value. Null and blank values yield None.
pub fn normalize(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Output of the cleaning step alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedValues {
    /// Distinct cleaned values, ascending.
    pub values: Vec<String>,
    pub total: usize,
    /// Null or blank inputs.
    pub excluded: usize,
    /// Inputs that collapsed into an already seen cleaned value.
    pub duplicates: usize,
}

/// Aggregate counts in the shape the reporting side expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// `total - valid - invalid`: null/blank inputs plus collapsed duplicates.
    pub missing: usize,
}

/// Result of a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// One entry per distinct cleaned value, ascending by value.
    pub results: Vec<ClassificationResult>,
    pub total: usize,
    pub excluded: usize,
    pub duplicates: usize,
}

impl CleanReport {
    pub fn valid(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter().filter(|r| r.status == Status::Valid)
    }

    pub fn invalid(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter().filter(|r| r.status == Status::Invalid)
    }

    pub fn summary(&self) -> Summary {
        let valid = self.valid().count();
        let invalid = self.results.len() - valid;
        Summary {
            total: self.total,
            valid,
            invalid,
            missing: self.total - valid - invalid,
        }
    }
}

/// Clean-then-classify over a batch of raw records.
#[derive(Debug, Clone, Copy)]
pub struct CleaningPipeline {
    classifier: PanClassifier,
    parallel_threshold: usize,
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        CleaningPipeline::new(PanClassifier::default())
    }
}

impl CleaningPipeline {
    pub fn new(classifier: PanClassifier) -> Self {
        CleaningPipeline {
            classifier,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the distinct-value count at which classification runs in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn classifier(&self) -> &PanClassifier {
        &self.classifier
    }

    /// Normalize and deduplicate raw values without classifying them.
    pub fn clean<I, S>(&self, raw: I) -> CleanedValues
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let mut total = 0;
        let mut excluded = 0;
        let mut duplicates = 0;

        for value in raw {
            total += 1;
            match normalize(value.as_ref().map(|s| s.as_ref())) {
                None => excluded += 1,
                Some(cleaned) => {
                    if !seen.insert(cleaned) {
                        duplicates += 1;
                    }
                }
            }
        }

        CleanedValues {
            values: seen.into_iter().collect(),
            total,
            excluded,
            duplicates,
        }
    }

    /// Clean the raw values and classify each distinct cleaned value.
    pub fn run<I, S>(&self, raw: I) -> CleanReport
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let cleaned = self.clean(raw);

        let results: Vec<ClassificationResult> = if cleaned.values.len() >= self.parallel_threshold {
            self.classifier.classify_batch(&cleaned.values)
        } else {
            cleaned
                .values
                .into_iter()
                .map(|v| self.classifier.classify_value(v))
                .collect()
        };

        for result in &results {
            if let Some(reason) = &result.reason {
                trace!(value = %result.value, %reason, "rejected PAN");
            }
        }

        let report = CleanReport {
            results,
            total: cleaned.total,
            excluded: cleaned.excluded,
            duplicates: cleaned.duplicates,
        };

        let summary = report.summary();
        debug!(
            total = report.total,
            excluded = report.excluded,
            duplicates = report.duplicates,
            valid = summary.valid,
            invalid = summary.invalid,
            "classified PAN batch"
        );

        report
    }
}

/// Run the default pipeline (strict rules) over raw values.
pub fn clean_and_classify<I, S>(raw: I) -> CleanReport
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    CleaningPipeline::default().run(raw)
}
