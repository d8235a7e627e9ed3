use noodles::core::Position;

use crate::core::interval::Interval;
use crate::core::types::VariantType;

/// One alternative allele of a variant record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltAllele {
    pub variant_type: VariantType,

    /// Size of the event in bases (inserted, deleted, or replaced)
    pub length: u64,

    /// Reference span affected by this allele, 0-based half-open
    pub footprint: Interval,
}

/// A parsed variant record.
///
/// Holds only what the concordance engine needs: where the variant is, what kind it is,
/// and how large it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub chrom: String,

    /// 1-based POS column
    pub position: Position,

    /// Usable ALT alleles, in file order; never empty
    pub alleles: Vec<AltAllele>,
}

impl VariantRecord {
    /// Overall type of the record; `Complex` when alleles disagree
    #[must_use]
    pub fn variant_type(&self) -> VariantType {
        let mut types = self.alleles.iter().map(|a| a.variant_type);
        match types.next() {
            Some(first) if types.all(|t| t == first) => first,
            _ => VariantType::Complex,
        }
    }

    /// Largest allele length
    #[must_use]
    pub fn max_len(&self) -> u64 {
        self.alleles.iter().map(|a| a.length).max().unwrap_or(0)
    }

    /// Footprints of every alternative allele
    #[must_use]
    pub fn footprint(&self) -> Vec<Interval> {
        self.alleles.iter().map(|a| a.footprint).collect()
    }
}
