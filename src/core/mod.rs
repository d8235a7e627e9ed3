//! Core data types for concordance counting.
//!
//! - [`VariantRecord`](variant::VariantRecord): a parsed variant with its alleles, footprint and length
//! - [`Interval`](interval::Interval): 0-based half-open genomic interval
//! - [`RegionSet`](regions::RegionSet): read-only chromosome → regions lookup
//! - [`VariantType`](types::VariantType), [`Category`](types::Category),
//!   [`MatchMode`](types::MatchMode): the closed enumerations driving classification
//!
//! ## Coordinates
//!
//! VCF positions are 1-based; everything derived from them (footprints, regions) is
//! 0-based half-open, matching BED.

pub mod interval;
pub mod regions;
pub mod types;
pub mod variant;
