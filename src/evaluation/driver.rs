use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::types::Category;
use crate::evaluation::filter::RegionFilter;
use crate::parsing::vcf::{parse_raw_record, ParseError, ParseOptions, VcfReader};
use crate::stats::counter::ClassificationCounter;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Failed to open {category} input {}: {source}", path.display())]
    OpenInput {
        category: Category,
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to read {category} input: {source}")]
    ReadInput {
        category: Category,
        #[source]
        source: ParseError,
    },

    #[error("Failed to create {category} output {}: {source}", path.display())]
    CreateOutput {
        category: Category,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {category} output: {source}")]
    WriteOutput {
        category: Category,
        #[source]
        source: std::io::Error,
    },
}

/// Paths of the four categorized input streams
#[derive(Debug, Clone)]
pub struct ComparisonInputs {
    pub true_positives: PathBuf,
    pub false_positives: PathBuf,
    pub false_negatives: PathBuf,
    pub truth: PathBuf,
}

impl ComparisonInputs {
    #[must_use]
    pub fn path(&self, category: Category) -> &Path {
        match category {
            Category::TruePositive => &self.true_positives,
            Category::FalsePositive => &self.false_positives,
            Category::FalseNegative => &self.false_negatives,
            Category::Truth => &self.truth,
        }
    }
}

/// Filtered passthrough output for a category: `<prefix>_<tag>.vcf`
#[must_use]
pub fn passthrough_path(prefix: &str, category: Category) -> PathBuf {
    PathBuf::from(format!("{prefix}_{}.vcf", category.tag()))
}

/// Record tallies for one phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseStats {
    /// Data lines read
    pub read: u64,
    /// Lines that passed the region filter and were counted
    pub retained: u64,
    /// Parsed records dropped by the region filter
    pub filtered: u64,
    /// Lines that could not be parsed and were skipped
    pub unparseable: u64,
}

/// Outcome of one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseReport {
    pub category: Category,
    #[serde(flatten)]
    pub stats: PhaseStats,
}

/// Runs the four categorized streams through the region filter into a counter.
///
/// Phases run one after another in [`Category::PROCESSING_ORDER`]. Each retained record
/// is copied verbatim to its category's passthrough output and applied to the counter
/// according to [`Category::counter_update`].
pub struct ComparisonDriver<'a> {
    filter: &'a RegionFilter,
    options: ParseOptions,
}

impl<'a> ComparisonDriver<'a> {
    #[must_use]
    pub fn new(filter: &'a RegionFilter, options: ParseOptions) -> Self {
        Self { filter, options }
    }

    /// Process all four inputs, writing passthrough files next to `prefix`.
    ///
    /// Every input is opened before any output is created, so a missing input aborts
    /// the run without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `CompareError` if any input cannot be opened or read, or if any output
    /// cannot be created or written.
    pub fn run(
        &self,
        inputs: &ComparisonInputs,
        prefix: &str,
        counter: &mut ClassificationCounter,
    ) -> Result<Vec<PhaseReport>, CompareError> {
        let mut readers = Vec::with_capacity(Category::PROCESSING_ORDER.len());
        for category in Category::PROCESSING_ORDER {
            let path = inputs.path(category);
            let reader = VcfReader::open(path).map_err(|source| CompareError::OpenInput {
                category,
                path: path.to_path_buf(),
                source,
            })?;
            readers.push((category, reader));
        }

        let mut reports = Vec::with_capacity(readers.len());
        for (category, mut reader) in readers {
            info!(
                "Processing {} variants from {}",
                category,
                inputs.path(category).display()
            );

            let out_path = passthrough_path(prefix, category);
            let file = File::create(&out_path).map_err(|source| CompareError::CreateOutput {
                category,
                path: out_path.clone(),
                source,
            })?;
            let mut writer = BufWriter::new(file);

            let stats = self.process_stream(category, &mut reader, &mut writer, counter)?;
            writer
                .flush()
                .map_err(|source| CompareError::WriteOutput { category, source })?;

            info!(
                "Finished {} variants: {} read, {} retained, {} outside regions, {} unparseable",
                category, stats.read, stats.retained, stats.filtered, stats.unparseable
            );
            reports.push(PhaseReport { category, stats });
        }

        Ok(reports)
    }

    /// Process one categorized stream: header first, then every retained record.
    ///
    /// Retained lines are written byte for byte. A line that is not valid UTF-8 or does
    /// not parse is counted as unparseable and skipped.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::ReadInput` if the stream fails mid-read or
    /// `CompareError::WriteOutput` if the passthrough output cannot be written.
    pub fn process_stream<W: Write>(
        &self,
        category: Category,
        reader: &mut VcfReader,
        writer: &mut W,
        counter: &mut ClassificationCounter,
    ) -> Result<PhaseStats, CompareError> {
        let write_err = |source| CompareError::WriteOutput { category, source };
        let update = category.counter_update();
        let mut stats = PhaseStats::default();

        writer.write_all(reader.header().as_bytes()).map_err(write_err)?;

        while let Some(line) = reader
            .next_line()
            .map_err(|source| CompareError::ReadInput { category, source })?
        {
            stats.read += 1;

            let record = match parse_raw_record(&line, self.options) {
                Ok(record) => record,
                Err(e) => {
                    debug!("Skipping {} line {}: {}", category, reader.line_number(), e);
                    stats.unparseable += 1;
                    continue;
                }
            };

            if !self.filter.retain(&record.chrom, &record.footprint()) {
                stats.filtered += 1;
                continue;
            }

            writer.write_all(&line).map_err(write_err)?;
            if !line.ends_with(b"\n") {
                writer.write_all(b"\n").map_err(write_err)?;
            }
            counter.apply(update, record.variant_type(), record.max_len());
            stats.retained += 1;
        }

        Ok(stats)
    }
}
