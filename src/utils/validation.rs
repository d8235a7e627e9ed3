//! Centralized validation of run configuration.
//!
//! Everything here runs before any input stream is opened, so a bad option never
//! leaves partial outputs behind.

/// Maximum number of bucket boundaries accepted on the command line
pub const MAX_BIN_BREAKS: usize = 1_000;

/// Configuration errors; all are fatal before processing starts
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid bin break '{0}': expected a non-negative integer")]
    InvalidBinBreak(String),
    #[error("Bin breaks must be strictly ascending: {previous} is followed by {next}")]
    BinBreaksNotAscending { previous: u64, next: u64 },
    #[error("Too many bin breaks: {0} exceeds maximum of {MAX_BIN_BREAKS}")]
    TooManyBinBreaks(usize),
    #[error("Overlap ratio must be between 0 and 1, got {0}")]
    InvalidOverlapRatio(f64),
}

/// Parse a comma-separated list of bucket boundaries such as `"500,1000"`.
///
/// Whitespace around entries is ignored and an empty string yields no boundaries.
///
/// # Examples
///
/// ```
/// use varcomp_stats::utils::validation::parse_bin_breaks;
///
/// assert_eq!(parse_bin_breaks("500, 1000").unwrap(), vec![500, 1000]);
/// assert!(parse_bin_breaks("").unwrap().is_empty());
/// assert!(parse_bin_breaks("1000,500").is_err());
/// assert!(parse_bin_breaks("10,abc").is_err());
/// ```
///
/// # Errors
///
/// Returns `ConfigError::InvalidBinBreak` for a non-numeric or negative entry,
/// `ConfigError::BinBreaksNotAscending` if the values are not strictly increasing, or
/// `ConfigError::TooManyBinBreaks` if the list is unreasonably long.
pub fn parse_bin_breaks(s: &str) -> Result<Vec<u64>, ConfigError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    let breaks = s
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<u64>()
                .map_err(|_| ConfigError::InvalidBinBreak(part.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    validate_bin_breaks(&breaks)?;
    Ok(breaks)
}

/// Check that bucket boundaries are strictly ascending and within limits
///
/// # Errors
///
/// Returns `ConfigError::BinBreaksNotAscending` or `ConfigError::TooManyBinBreaks`.
pub fn validate_bin_breaks(breaks: &[u64]) -> Result<(), ConfigError> {
    if breaks.len() > MAX_BIN_BREAKS {
        return Err(ConfigError::TooManyBinBreaks(breaks.len()));
    }

    if let Some(pair) = breaks.windows(2).find(|w| w[0] >= w[1]) {
        return Err(ConfigError::BinBreaksNotAscending {
            previous: pair[0],
            next: pair[1],
        });
    }

    Ok(())
}

/// Validate the overlap ratio carried into the report for provenance
///
/// # Errors
///
/// Returns `ConfigError::InvalidOverlapRatio` if the value is outside `[0, 1]` or NaN.
pub fn validate_overlap_ratio(ratio: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(ConfigError::InvalidOverlapRatio(ratio))
    }
}
