//! Report assembly and emission.
//!
//! A [`Report`] is built once, after all four streams have been processed, and is never
//! modified afterwards. It is written as pretty JSON to `<prefix>_report.json` and can
//! optionally be spliced into an HTML template, replacing the [`HTML_MARKER`] comment,
//! to produce `<prefix>_varcomp.html`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::MatchMode;
use crate::evaluation::driver::PhaseReport;
use crate::stats::counter::ClassificationCounter;
use crate::stats::summary::CounterSummary;

pub mod table;

/// Placeholder in HTML templates replaced by the serialized report
pub const HTML_MARKER: &str = "<!--VARCOMP_JSON-->";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTML template has no {HTML_MARKER} marker")]
    MissingMarker,
}

/// Input file names, recorded as given on the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFiles {
    pub tp_vcf_filename: String,
    pub fp_vcf_filename: String,
    pub fn_vcf_filename: String,
    pub t_vcf_filename: String,
}

/// Run parameters carried into the report for provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    pub inputs: InputFiles,

    #[serde(default)]
    pub bed_filename: Option<String>,

    pub match_mode: MatchMode,

    pub ignore_insertion_length: bool,

    /// Position tolerance used by the upstream comparison
    #[serde(default)]
    pub wiggle: Option<u64>,

    /// Reciprocal overlap used by the upstream comparison
    #[serde(default, rename = "overlap_percent")]
    pub overlap_ratio: Option<f64>,
}

/// Immutable snapshot of one completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub params: RunParams,

    #[serde(rename = "num_true_correct")]
    pub counts: CounterSummary,

    /// Per-category record tallies
    #[serde(default)]
    pub records: Vec<PhaseReport>,
}

impl Report {
    /// Bundle run parameters and the final counter state
    #[must_use]
    pub fn assemble(
        params: RunParams,
        counter: &ClassificationCounter,
        records: Vec<PhaseReport>,
    ) -> Self {
        Self {
            params,
            counts: counter.summary(),
            records,
        }
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Serialize` if serialization fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report previously written by [`emit`]
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Serialize` if the JSON is not a valid report.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a report from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Read` if the file cannot be read, or
    /// `ReportError::Serialize` if it is not a valid report.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Report artifact for `prefix`: `<prefix>_report.json`
#[must_use]
pub fn report_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}_report.json"))
}

/// HTML artifact for `prefix`: `<prefix>_varcomp.html`
#[must_use]
pub fn html_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}_varcomp.html"))
}

/// Serialize `report` and write it to [`report_path`].
///
/// Serialization completes before the file is created, so a failure never leaves a
/// truncated report behind. Returns the written path and the JSON text.
///
/// # Errors
///
/// Returns `ReportError::Serialize` or `ReportError::Write`.
pub fn emit(report: &Report, prefix: &str) -> Result<(PathBuf, String), ReportError> {
    let json = report.to_json()?;
    let path = report_path(prefix);
    std::fs::write(&path, &json).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok((path, json))
}

/// Replace the first [`HTML_MARKER`] in `template` with `json`
///
/// # Errors
///
/// Returns `ReportError::MissingMarker` if the template has no marker.
pub fn splice_html(template: &str, json: &str) -> Result<String, ReportError> {
    if !template.contains(HTML_MARKER) {
        return Err(ReportError::MissingMarker);
    }
    Ok(template.replacen(HTML_MARKER, json, 1))
}

/// Read `template_path`, splice in `json` and write [`html_path`]
///
/// # Errors
///
/// Returns `ReportError::Read`, `ReportError::MissingMarker` or `ReportError::Write`.
pub fn emit_html(template_path: &Path, json: &str, prefix: &str) -> Result<PathBuf, ReportError> {
    let template =
        std::fs::read_to_string(template_path).map_err(|source| ReportError::Read {
            path: template_path.to_path_buf(),
            source,
        })?;
    let html = splice_html(&template, json)?;
    let path = html_path(prefix);
    std::fs::write(&path, html).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
