//! Minimal VCF reader for categorized benchmark streams.
//!
//! The header (every leading `#` line) is captured verbatim so it can be copied to the
//! filtered outputs. Data lines are handed out as raw bytes; [`parse_raw_record`] decodes
//! one and turns it into a [`VariantRecord`] on demand.
//!
//! Only CHROM, POS, REF, ALT and the `END`/`SVLEN` INFO keys are interpreted. Genotypes
//! are not consulted: every usable ALT allele contributes to the footprint.

use std::io::BufRead;
use std::path::Path;

use noodles::core::Position;
use thiserror::Error;

use crate::core::interval::Interval;
use crate::core::types::VariantType;
use crate::core::variant::{AltAllele, VariantRecord};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid VCF record: {0}")]
    InvalidRecord(String),

    #[error("Invalid VCF header line {line}: {message}")]
    InvalidHeader { line: usize, message: String },

    #[error("Invalid BED line {line}: {message}")]
    InvalidBed { line: usize, message: String },
}

/// Options controlling how records are interpreted
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Count insertions as length 0 and accept symbolic insertions without a length
    pub ignore_insertion_length: bool,
}

/// Streaming reader over the data lines of a VCF file.
///
/// Data lines are returned as raw bytes with their original terminator, so they can be
/// copied to outputs unchanged and decoded one at a time.
pub struct VcfReader {
    reader: Box<dyn BufRead>,
    header: String,
    pending: Option<Vec<u8>>,
    line_number: usize,
}

impl VcfReader {
    /// Open a plain or compressed VCF and read its header
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened or the header cannot be read,
    /// or `ParseError::InvalidHeader` if a header line is not valid UTF-8.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let reader = crate::parsing::open_text(path)?;
        Self::new(reader)
    }

    /// Wrap an already-open reader and consume its header
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading the header fails, or
    /// `ParseError::InvalidHeader` if a header line is not valid UTF-8.
    pub fn new(mut reader: Box<dyn BufRead>) -> Result<Self, ParseError> {
        let mut header = String::new();
        let mut pending = None;
        let mut line_number = 0;

        loop {
            let mut buf = Vec::new();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;
            if buf.first() == Some(&b'#') {
                let line = std::str::from_utf8(&buf).map_err(|e| ParseError::InvalidHeader {
                    line: line_number,
                    message: e.to_string(),
                })?;
                header.push_str(line);
                if !line.ends_with('\n') {
                    header.push('\n');
                }
            } else if !is_blank(&buf) {
                pending = Some(buf);
                break;
            }
        }

        Ok(Self {
            reader,
            header,
            pending,
            line_number,
        })
    }

    /// Header lines, each newline-terminated
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// 1-based number of the most recently returned line
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Next non-blank data line as raw bytes, including its line terminator if it had one
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the underlying stream fails.
    pub fn next_line(&mut self) -> Result<Option<Vec<u8>>, ParseError> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }

        loop {
            let mut buf = Vec::new();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            if !is_blank(&buf) {
                return Ok(Some(buf));
            }
        }
    }
}

impl Iterator for VcfReader {
    type Item = Result<Vec<u8>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Strip a trailing `\n` or `\r\n`
#[must_use]
pub fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

/// Decode a raw data line and parse it
///
/// # Errors
///
/// Returns `ParseError::InvalidRecord` if the line is not valid UTF-8 or fails
/// [`parse_record`].
pub fn parse_raw_record(line: &[u8], options: ParseOptions) -> Result<VariantRecord, ParseError> {
    let text = std::str::from_utf8(trim_line_end(line))
        .map_err(|e| ParseError::InvalidRecord(format!("not valid UTF-8: {e}")))?;
    parse_record(text, options)
}

/// Parse one VCF data line
///
/// # Errors
///
/// Returns `ParseError::InvalidRecord` if required columns are missing or malformed, or
/// if no ALT allele describes a countable variant.
pub fn parse_record(line: &str, options: ParseOptions) -> Result<VariantRecord, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 5 {
        return Err(ParseError::InvalidRecord(format!(
            "expected at least 5 tab-separated columns, found {}",
            fields.len()
        )));
    }

    let chrom = fields[0].trim();
    if chrom.is_empty() {
        return Err(ParseError::InvalidRecord("empty CHROM".to_string()));
    }

    let position: Position = fields[1]
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidRecord(format!("invalid POS '{}'", fields[1])))?;

    let reference = fields[3].trim();
    if reference.is_empty() || reference == "." || !is_sequence(reference) {
        return Err(ParseError::InvalidRecord(format!(
            "invalid REF '{reference}'"
        )));
    }

    let info = InfoFields::parse(fields.get(7).copied().unwrap_or("."))?;

    let mut alleles = Vec::new();
    for alt in fields[4].trim().split(',') {
        if let Some(allele) = parse_allele(position, reference, alt, &info, options)? {
            alleles.push(allele);
        }
    }

    if alleles.is_empty() {
        return Err(ParseError::InvalidRecord(format!(
            "no usable ALT allele in '{}'",
            fields[4]
        )));
    }

    Ok(VariantRecord {
        chrom: chrom.to_string(),
        position,
        alleles,
    })
}

/// INFO keys that affect footprint and length
#[derive(Debug, Default)]
struct InfoFields {
    end: Option<u64>,
    svlen: Option<u64>,
}

impl InfoFields {
    fn parse(info: &str) -> Result<Self, ParseError> {
        let mut fields = Self::default();
        if info == "." {
            return Ok(fields);
        }

        for entry in info.split(';') {
            let Some((key, value)) = entry.split_once('=') else {
                continue;
            };
            match key {
                "END" => {
                    let end = value.parse::<u64>().map_err(|_| {
                        ParseError::InvalidRecord(format!("invalid END '{value}'"))
                    })?;
                    fields.end = Some(end);
                }
                "SVLEN" => {
                    // Multi-allelic SVLEN lists are rare; the first value describes the event
                    let first = value.split(',').next().unwrap_or(value);
                    let svlen = first.parse::<i64>().map_err(|_| {
                        ParseError::InvalidRecord(format!("invalid SVLEN '{value}'"))
                    })?;
                    fields.svlen = Some(svlen.unsigned_abs());
                }
                _ => {}
            }
        }

        Ok(fields)
    }
}

fn is_sequence(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn parse_allele(
    position: Position,
    reference: &str,
    alt: &str,
    info: &InfoFields,
    options: ParseOptions,
) -> Result<Option<AltAllele>, ParseError> {
    let alt = alt.trim();
    if alt.is_empty() || alt == "." || alt == "*" {
        return Ok(None);
    }

    let pos = usize::from(position) as u64;

    if let Some(symbol) = alt.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        return parse_symbolic_allele(pos, symbol, info, options);
    }

    if alt.contains('[') || alt.contains(']') {
        // Breakend: only the anchoring base is on this record's chromosome
        return Ok(Some(AltAllele {
            variant_type: VariantType::Translocation,
            length: 0,
            footprint: Interval::new(pos - 1, pos),
        }));
    }

    if !is_sequence(alt) {
        return Err(ParseError::InvalidRecord(format!("invalid ALT '{alt}'")));
    }

    classify_sequence_allele(pos - 1, reference, alt, options)
}

fn parse_symbolic_allele(
    pos: u64,
    symbol: &str,
    info: &InfoFields,
    options: ParseOptions,
) -> Result<Option<AltAllele>, ParseError> {
    let variant_type = match symbol.split(':').next().unwrap_or(symbol) {
        "DEL" => VariantType::Deletion,
        "INS" => VariantType::Insertion,
        "DUP" => VariantType::TandemDuplication,
        "INV" => VariantType::Inversion,
        _ => return Ok(None),
    };

    let length = info
        .svlen
        .or_else(|| info.end.map(|end| end.saturating_sub(pos)));

    if variant_type == VariantType::Insertion {
        let length = match (length, options.ignore_insertion_length) {
            (_, true) => 0,
            (Some(len), false) => len,
            (None, false) => {
                return Err(ParseError::InvalidRecord(format!(
                    "<{symbol}> without SVLEN"
                )))
            }
        };
        return Ok(Some(AltAllele {
            variant_type,
            length,
            footprint: Interval::point(pos),
        }));
    }

    let length = length.ok_or_else(|| {
        ParseError::InvalidRecord(format!("<{symbol}> without SVLEN or END"))
    })?;
    let end = match info.end {
        Some(end) => end,
        None => offset(pos, length)?,
    }
    .max(pos);

    Ok(Some(AltAllele {
        variant_type,
        length,
        footprint: Interval::new(pos, end),
    }))
}

/// Classify a sequence allele after trimming the bases it shares with REF.
///
/// The shared prefix is trimmed first, then the shared suffix of what remains, so the
/// footprint starts right after the padding base for indels.
fn classify_sequence_allele(
    start: u64,
    reference: &str,
    alt: &str,
    options: ParseOptions,
) -> Result<Option<AltAllele>, ParseError> {
    let r = reference.as_bytes();
    let a = alt.as_bytes();

    let prefix = r
        .iter()
        .zip(a)
        .take_while(|(x, y)| x.eq_ignore_ascii_case(y))
        .count();
    let (r, a) = (&r[prefix..], &a[prefix..]);
    let suffix = r
        .iter()
        .rev()
        .zip(a.iter().rev())
        .take_while(|(x, y)| x.eq_ignore_ascii_case(y))
        .count();
    let ref_len = (r.len() - suffix) as u64;
    let alt_len = (a.len() - suffix) as u64;

    let (variant_type, length) = match (ref_len, alt_len) {
        (0, 0) => return Ok(None),
        (0, n) => (
            VariantType::Insertion,
            if options.ignore_insertion_length { 0 } else { n },
        ),
        (n, 0) => (VariantType::Deletion, n),
        (1, 1) => (VariantType::Snp, 1),
        (n, m) if n == m => (VariantType::Mnp, n),
        (n, m) => (VariantType::Complex, n.max(m)),
    };

    let footprint_start = offset(start, prefix as u64)?;
    Ok(Some(AltAllele {
        variant_type,
        length,
        footprint: Interval::new(footprint_start, offset(footprint_start, ref_len)?),
    }))
}

fn offset(base: u64, delta: u64) -> Result<u64, ParseError> {
    base.checked_add(delta).ok_or_else(|| {
        ParseError::InvalidRecord(format!("coordinate {base} + {delta} overflows"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(line: &str) -> VariantRecord {
        parse_record(line, ParseOptions::default()).unwrap()
    }

    fn reader(text: &'static str) -> VcfReader {
        VcfReader::new(Box::new(Cursor::new(text))).unwrap()
    }

    #[test]
    fn test_reader_splits_header_and_records() {
        let mut vcf = reader(
            "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
             chr1\t10\t.\tA\tG\t.\tPASS\t.\n\nchr1\t20\t.\tC\tT\t.\tPASS\t.\n",
        );

        assert_eq!(
            vcf.header(),
            "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n"
        );
        let lines: Vec<Vec<u8>> = vcf.by_ref().map(Result::unwrap).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], b"chr1\t10\t.\tA\tG\t.\tPASS\t.\n");
        assert!(lines[1].starts_with(b"chr1\t20"));
        assert_eq!(vcf.line_number(), 5);
    }

    #[test]
    fn test_reader_keeps_line_terminators() {
        let mut vcf = reader("#CHROM\tPOS\r\nchr1\t10\t.\tA\tG\r\nchr1\t20\t.\tC\tT");
        assert_eq!(vcf.header(), "#CHROM\tPOS\r\n");
        assert_eq!(vcf.next_line().unwrap().unwrap(), b"chr1\t10\t.\tA\tG\r\n");
        assert_eq!(vcf.next_line().unwrap().unwrap(), b"chr1\t20\t.\tC\tT");
        assert!(vcf.next_line().unwrap().is_none());
    }

    #[test]
    fn test_reader_does_not_decode_data_lines() {
        let text: &[u8] = b"#CHROM\tPOS\nchr1\t10\t.\tA\tG\t.\tPASS\tNOTE=caf\xe9\n";
        let mut vcf = VcfReader::new(Box::new(Cursor::new(text))).unwrap();
        let line = vcf.next_line().unwrap().unwrap();
        assert!(line.ends_with(b"caf\xe9\n"));
        assert!(parse_raw_record(&line, ParseOptions::default()).is_err());
    }

    #[test]
    fn test_reader_rejects_non_utf8_header() {
        let text: &[u8] = b"##source=caf\xe9\n#CHROM\tPOS\n";
        let result = VcfReader::new(Box::new(Cursor::new(text)));
        assert!(matches!(result, Err(ParseError::InvalidHeader { line: 1, .. })));
    }

    #[test]
    fn test_parse_raw_record_strips_terminator() {
        let line = b"chr1\t100\t.\tA\tG\t.\tPASS\t.\r\n";
        let record = parse_raw_record(line, ParseOptions::default()).unwrap();
        assert_eq!(record.variant_type(), VariantType::Snp);
    }

    #[test]
    fn test_reader_header_only() {
        let mut vcf = reader("##fileformat=VCFv4.2\n#CHROM\tPOS\n");
        assert_eq!(vcf.header().lines().count(), 2);
        assert!(vcf.next_line().unwrap().is_none());
    }

    #[test]
    fn test_reader_empty_input() {
        let mut vcf = reader("");
        assert_eq!(vcf.header(), "");
        assert!(vcf.next_line().unwrap().is_none());
    }

    #[test]
    fn test_parse_snp() {
        let record = parse("chr1\t100\trs1\tA\tG\t50\tPASS\tDP=10");
        assert_eq!(record.chrom, "chr1");
        assert_eq!(usize::from(record.position), 100);
        assert_eq!(record.variant_type(), VariantType::Snp);
        assert_eq!(record.max_len(), 1);
        assert_eq!(record.footprint(), vec![Interval::new(99, 100)]);
    }

    #[test]
    fn test_parse_insertion() {
        let record = parse("chr1\t100\t.\tA\tACGT\t.\tPASS\t.");
        assert_eq!(record.variant_type(), VariantType::Insertion);
        assert_eq!(record.max_len(), 3);
        assert_eq!(record.footprint(), vec![Interval::point(100)]);
    }

    #[test]
    fn test_parse_insertion_ignoring_length() {
        let options = ParseOptions {
            ignore_insertion_length: true,
        };
        let record = parse_record("chr1\t100\t.\tA\tACGT\t.\tPASS\t.", options).unwrap();
        assert_eq!(record.variant_type(), VariantType::Insertion);
        assert_eq!(record.max_len(), 0);
    }

    #[test]
    fn test_parse_deletion() {
        let record = parse("chr1\t100\t.\tACGT\tA\t.\tPASS\t.");
        assert_eq!(record.variant_type(), VariantType::Deletion);
        assert_eq!(record.max_len(), 3);
        assert_eq!(record.footprint(), vec![Interval::new(100, 103)]);
    }

    #[test]
    fn test_parse_mnp_and_complex() {
        let mnp = parse("chr1\t100\t.\tACG\tTCA\t.\tPASS\t.");
        assert_eq!(mnp.variant_type(), VariantType::Mnp);
        assert_eq!(mnp.max_len(), 3);

        let complex = parse("chr1\t100\t.\tACG\tTTTTT\t.\tPASS\t.");
        assert_eq!(complex.variant_type(), VariantType::Complex);
        assert_eq!(complex.max_len(), 5);
    }

    #[test]
    fn test_parse_shared_suffix_trimmed() {
        // AC -> GC is a SNP at the first base
        let record = parse("chr1\t100\t.\tAC\tGC\t.\tPASS\t.");
        assert_eq!(record.variant_type(), VariantType::Snp);
        assert_eq!(record.footprint(), vec![Interval::new(99, 100)]);
    }

    #[test]
    fn test_parse_multiallelic() {
        let record = parse("chr1\t100\t.\tACGT\tA,ACGTTTTTT\t.\tPASS\t.");
        assert_eq!(record.alleles.len(), 2);
        assert_eq!(record.variant_type(), VariantType::Complex);
        assert_eq!(record.max_len(), 5);
    }

    #[test]
    fn test_parse_symbolic_deletion() {
        let record = parse("chr2\t1000\t.\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=1500;SVLEN=-500");
        assert_eq!(record.variant_type(), VariantType::Deletion);
        assert_eq!(record.max_len(), 500);
        assert_eq!(record.footprint(), vec![Interval::new(1000, 1500)]);
    }

    #[test]
    fn test_parse_symbolic_length_from_end() {
        let record = parse("chr2\t1000\t.\tN\t<INV>\t.\tPASS\tEND=1250");
        assert_eq!(record.variant_type(), VariantType::Inversion);
        assert_eq!(record.max_len(), 250);

        let dup = parse("chr2\t1000\t.\tN\t<DUP:TANDEM>\t.\tPASS\tSVLEN=300");
        assert_eq!(dup.variant_type(), VariantType::TandemDuplication);
        assert_eq!(dup.footprint(), vec![Interval::new(1000, 1300)]);
    }

    #[test]
    fn test_parse_symbolic_insertion_requires_length() {
        let line = "chr2\t1000\t.\tN\t<INS>\t.\tPASS\tSVTYPE=INS";
        assert!(parse_record(line, ParseOptions::default()).is_err());

        let options = ParseOptions {
            ignore_insertion_length: true,
        };
        let record = parse_record(line, options).unwrap();
        assert_eq!(record.variant_type(), VariantType::Insertion);
        assert_eq!(record.max_len(), 0);
    }

    #[test]
    fn test_parse_breakend() {
        let record = parse("chr1\t500\tbnd1\tA\tA[chr5:1000[\t.\tPASS\tSVTYPE=BND");
        assert_eq!(record.variant_type(), VariantType::Translocation);
        assert_eq!(record.footprint(), vec![Interval::new(499, 500)]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let options = ParseOptions::default();
        assert!(parse_record("chr1\t100\t.\tA", options).is_err());
        assert!(parse_record("chr1\tabc\t.\tA\tG", options).is_err());
        assert!(parse_record("chr1\t0\t.\tA\tG", options).is_err());
        assert!(parse_record("chr1\t100\t.\tA\t.", options).is_err());
        assert!(parse_record("chr1\t100\t.\tA\tA", options).is_err());
        assert!(parse_record("chr1\t100\t.\tA\tG\t.\t.\tEND=x", options).is_err());
    }

    #[test]
    fn test_parse_rejects_coordinate_overflow() {
        let options = ParseOptions::default();
        let max = u64::MAX;
        let symbolic = format!("chr1\t{max}\t.\tN\t<DEL>\t.\t.\tSVLEN=-5");
        assert!(matches!(
            parse_record(&symbolic, options),
            Err(ParseError::InvalidRecord(_))
        ));
        let deletion = format!("chr1\t{max}\t.\tACG\tA\t.\t.\t.");
        assert!(matches!(
            parse_record(&deletion, options),
            Err(ParseError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_parse_skips_unusable_alleles() {
        let record = parse("chr1\t100\t.\tA\t*,G,<CNV>\t.\tPASS\t.");
        assert_eq!(record.alleles.len(), 1);
        assert_eq!(record.variant_type(), VariantType::Snp);
    }
}
