//! PAN screening
//!
//! Cleans bulk PAN (Permanent Account Number) records and classifies each
//! distinct value as Valid or Invalid. A value is Valid when it has the
//! letter{5} digit{4} letter{1} layout, no two adjacent characters are equal,
//! and neither the letter block nor the digit block is an ascending run.
//! Optional Python bindings are built with the `python` feature.

pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod validators;

#[cfg(feature = "python")]
mod python;

pub use classifier::{
    classify, AdjacencyScope, ClassificationResult, PanClassifier, PanNumber, PanRules, Status,
};
pub use error::Rejection;
pub use pipeline::{clean_and_classify, CleanReport, CleanedValues, CleaningPipeline, Summary};
pub use validators::{has_adjacent_repeat, is_strict_ascending_sequence};
