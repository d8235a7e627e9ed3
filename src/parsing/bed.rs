use std::io::BufRead;
use std::path::Path;

use crate::core::interval::Interval;
use crate::core::regions::RegionSet;
use crate::parsing::vcf::ParseError;

/// Parse a BED file (plain or gzip) into a region set
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or `ParseError::InvalidBed` for
/// the first malformed line.
pub fn parse_bed_file(path: &Path) -> Result<RegionSet, ParseError> {
    let reader = crate::parsing::open_text(path)?;
    parse_bed_reader(reader)
}

/// Parse BED text into a region set
///
/// # Errors
///
/// Returns `ParseError::InvalidBed` for the first malformed line.
pub fn parse_bed_text(text: &str) -> Result<RegionSet, ParseError> {
    parse_bed_reader(text.as_bytes())
}

fn parse_bed_reader<R: BufRead>(reader: R) -> Result<RegionSet, ParseError> {
    let mut intervals = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("track")
            || trimmed.starts_with("browser")
        {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(ParseError::InvalidBed {
                line: line_num,
                message: format!("expected at least 3 fields, found {}", fields.len()),
            });
        }

        let start: u64 = parse_coordinate(fields[1], line_num)?;
        let end: u64 = parse_coordinate(fields[2], line_num)?;
        if start > end {
            return Err(ParseError::InvalidBed {
                line: line_num,
                message: format!("start {start} is after end {end}"),
            });
        }

        intervals.push((fields[0].to_string(), Interval::new(start, end)));
    }

    Ok(RegionSet::from_intervals(intervals))
}

fn parse_coordinate(value: &str, line: usize) -> Result<u64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidBed {
        line,
        message: format!("invalid coordinate '{value}'"),
    })
}
