//! Readers for the text formats consumed by the concordance engine.
//!
//! - **VCF**: categorized variant streams (TP, FP, FN, truth). Records are parsed just far
//!   enough to recover chromosome, footprint, type and length.
//! - **BED**: the optional region set restricting which variants are counted.
//!
//! Both readers accept plain text or gzip/bgzip compressed input, selected by the
//! `.gz`/`.bgz` extension.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

pub mod bed;
pub mod vcf;

/// Check if the path names a gzip or bgzip compressed file
#[must_use]
pub fn is_compressed(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a text file for buffered line reading, decompressing if needed.
///
/// bgzip output is a series of gzip members, so a multi-member decoder is used.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened.
pub fn open_text(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if is_compressed(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
