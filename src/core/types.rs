use serde::{Deserialize, Serialize};

/// Overall type of a variant, used as the first dimension of the counter table.
///
/// The set is closed so that counters can be laid out as a dense table indexed by
/// [`VariantType::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VariantType {
    #[serde(rename = "SNP")]
    Snp,
    #[serde(rename = "MNP")]
    Mnp,
    Insertion,
    Deletion,
    Complex,
    Inversion,
    #[serde(rename = "Tandem_Dup")]
    TandemDuplication,
    Translocation,
}

impl VariantType {
    /// All variant types, in table order
    pub const ALL: [VariantType; 8] = [
        VariantType::Snp,
        VariantType::Mnp,
        VariantType::Insertion,
        VariantType::Deletion,
        VariantType::Complex,
        VariantType::Inversion,
        VariantType::TandemDuplication,
        VariantType::Translocation,
    ];

    /// Number of distinct variant types
    pub const COUNT: usize = Self::ALL.len();

    /// Stable row index of this type in a counter table
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Snp => 0,
            Self::Mnp => 1,
            Self::Insertion => 2,
            Self::Deletion => 3,
            Self::Complex => 4,
            Self::Inversion => 5,
            Self::TandemDuplication => 6,
            Self::Translocation => 7,
        }
    }

    /// Name used in reports and summary tables
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Snp => "SNP",
            Self::Mnp => "MNP",
            Self::Insertion => "Insertion",
            Self::Deletion => "Deletion",
            Self::Complex => "Complex",
            Self::Inversion => "Inversion",
            Self::TandemDuplication => "Tandem_Dup",
            Self::Translocation => "Translocation",
        }
    }
}

impl std::fmt::Display for VariantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How a variant footprint is matched against the region set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every footprint interval must lie entirely inside a single region
    #[default]
    Both,
    /// At least one endpoint of the footprint must lie inside a region
    Either,
}

/// Which input stream a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TruePositive,
    FalsePositive,
    FalseNegative,
    Truth,
}

impl Category {
    /// Fixed phase order; keeps output file creation deterministic
    pub const PROCESSING_ORDER: [Category; 4] = [
        Category::FalsePositive,
        Category::TruePositive,
        Category::FalseNegative,
        Category::Truth,
    ];

    /// Short tag used in output file names (`<prefix>_<tag>.vcf`)
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::TruePositive => "tp",
            Self::FalsePositive => "fp",
            Self::FalseNegative => "fn",
            Self::Truth => "t",
        }
    }

    /// The counter update a retained record of this category triggers.
    ///
    /// False negatives only add to the truth total; the FN count itself is derived as
    /// `T - TP`. Truth records update nothing, their contribution already arrives through
    /// the TP and FN streams.
    #[must_use]
    pub fn counter_update(self) -> CounterUpdate {
        match self {
            Self::FalsePositive => CounterUpdate::FalsePositive,
            Self::TruePositive => CounterUpdate::TruePositive,
            Self::FalseNegative => CounterUpdate::TruthOnly,
            Self::Truth => CounterUpdate::None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TruePositive => write!(f, "true positive"),
            Self::FalsePositive => write!(f, "false positive"),
            Self::FalseNegative => write!(f, "false negative"),
            Self::Truth => write!(f, "truth"),
        }
    }
}

/// Counter operation applied for one retained record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterUpdate {
    /// Increment FP
    FalsePositive,
    /// Increment TP and T
    TruePositive,
    /// Increment T only
    TruthOnly,
    /// Leave counters untouched
    None,
}
