//! Python bindings.
//!
//! Releases the GIL while a batch is cleaned and classified.

use pyo3::prelude::*;

use crate::classifier::{self, ClassificationResult};
use crate::pipeline;
use crate::validators;

/// One classified value.
#[pyclass(name = "PanResult")]
#[derive(Clone)]
pub struct PyPanResult {
    #[pyo3(get)]
    pub value: String,
    #[pyo3(get)]
    pub status: String,
    #[pyo3(get)]
    pub reason: Option<String>,
}

#[pymethods]
impl PyPanResult {
    fn __repr__(&self) -> String {
        match &self.reason {
            Some(reason) => format!(
                "PanResult(value='{}', status='{}', reason='{}')",
                self.value, self.status, reason
            ),
            None => format!("PanResult(value='{}', status='{}')", self.value, self.status),
        }
    }
}

impl From<ClassificationResult> for PyPanResult {
    fn from(r: ClassificationResult) -> Self {
        PyPanResult {
            status: r.status.to_string(),
            reason: r.reason.map(|reason| reason.code().to_string()),
            value: r.value,
        }
    }
}

/// Check a string for two equal consecutive characters
#[pyfunction]
fn has_adjacent_repeat(s: &str) -> bool {
    validators::has_adjacent_repeat(s)
}

/// Check whether a string is one ascending run of code points
#[pyfunction]
fn is_strict_ascending_sequence(s: &str) -> bool {
    validators::is_strict_ascending_sequence(s)
}

/// Classify a cleaned value, returning "Valid" or "Invalid"
#[pyfunction]
fn classify_pan(value: &str) -> &'static str {
    classifier::classify(value).as_str()
}

/// Clean and classify raw values.
///
/// Returns (results, excluded) where excluded counts None/blank inputs.
#[pyfunction]
fn clean_and_classify(py: Python<'_>, values: Vec<Option<String>>) -> (Vec<PyPanResult>, usize) {
    py.allow_threads(|| {
        let report = pipeline::clean_and_classify(values);
        let excluded = report.excluded;
        let results = report.results.into_iter().map(PyPanResult::from).collect();
        (results, excluded)
    })
}

/// Check if native extension is working
#[pyfunction]
fn is_native_available() -> bool {
    true
}

#[pymodule]
fn panscreen(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPanResult>()?;

    m.add_function(wrap_pyfunction!(has_adjacent_repeat, m)?)?;
    m.add_function(wrap_pyfunction!(is_strict_ascending_sequence, m)?)?;
    m.add_function(wrap_pyfunction!(classify_pan, m)?)?;
    m.add_function(wrap_pyfunction!(clean_and_classify, m)?)?;

    m.add_function(wrap_pyfunction!(is_native_available, m)?)?;
    Ok(())
}
