use crate::core::interval::Interval;
use crate::core::regions::RegionSet;
use crate::core::types::MatchMode;

/// Decides whether a variant's footprint falls inside the configured regions.
///
/// Without a region set every variant is retained.
#[derive(Debug, Clone, Default)]
pub struct RegionFilter {
    regions: Option<RegionSet>,
    mode: MatchMode,
}

impl RegionFilter {
    /// Filter that keeps everything
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(regions: RegionSet, mode: MatchMode) -> Self {
        Self {
            regions: Some(regions),
            mode,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.regions.is_some()
    }

    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether a variant on `chrom` with the given footprint counts toward the report.
    ///
    /// In `Both` mode every footprint interval must sit inside a single region. In
    /// `Either` mode one endpoint of the footprint's hull inside any region is enough.
    /// An empty footprint or a chromosome without regions is never retained.
    #[must_use]
    pub fn retain(&self, chrom: &str, footprint: &[Interval]) -> bool {
        let Some(regions) = &self.regions else {
            return true;
        };

        if footprint.is_empty() {
            return false;
        }

        match self.mode {
            MatchMode::Both => footprint
                .iter()
                .all(|iv| regions.contains_interval(chrom, iv)),
            MatchMode::Either => Interval::hull(footprint).is_some_and(|hull| {
                let (first, last) = hull.endpoints();
                regions.contains_point(chrom, first) || regions.contains_point(chrom, last)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> RegionSet {
        RegionSet::from_intervals(vec![
            ("chr1", Interval::new(100, 200)),
            ("chr1", Interval::new(300, 400)),
        ])
    }

    #[test]
    fn test_disabled_keeps_everything() {
        let filter = RegionFilter::disabled();
        assert!(!filter.is_enabled());
        assert_eq!(filter.mode(), MatchMode::Both);
        assert!(filter.retain("chrUn", &[Interval::new(0, 10)]));
        assert!(filter.retain("chr1", &[]));
    }

    #[test]
    fn test_both_requires_full_containment() {
        let filter = RegionFilter::new(regions(), MatchMode::Both);
        assert!(filter.retain("chr1", &[Interval::new(120, 180)]));
        assert!(!filter.retain("chr1", &[Interval::new(150, 250)]));
        assert!(!filter.retain("chr1", &[Interval::new(150, 350)]));
    }

    #[test]
    fn test_both_checks_every_allele() {
        let filter = RegionFilter::new(regions(), MatchMode::Both);
        let inside = [Interval::new(120, 130), Interval::new(310, 320)];
        assert!(filter.retain("chr1", &inside));
        let one_outside = [Interval::new(120, 130), Interval::new(250, 260)];
        assert!(!filter.retain("chr1", &one_outside));
    }

    #[test]
    fn test_either_accepts_one_endpoint() {
        let filter = RegionFilter::new(regions(), MatchMode::Either);
        assert!(filter.is_enabled());
        assert_eq!(filter.mode(), MatchMode::Either);
        // Starts inside, ends outside
        assert!(filter.retain("chr1", &[Interval::new(150, 250)]));
        // Starts outside, last base inside
        assert!(filter.retain("chr1", &[Interval::new(250, 301)]));
        // Spans a region but both endpoints are outside
        assert!(!filter.retain("chr1", &[Interval::new(250, 450)]));
        // Breakends in different regions
        assert!(filter.retain("chr1", &[Interval::new(150, 151), Interval::new(350, 351)]));
    }

    #[test]
    fn test_insertion_point_footprint() {
        let both = RegionFilter::new(regions(), MatchMode::Both);
        assert!(both.retain("chr1", &[Interval::point(100)]));
        assert!(!both.retain("chr1", &[Interval::point(200)]));

        let either = RegionFilter::new(regions(), MatchMode::Either);
        assert!(either.retain("chr1", &[Interval::point(199)]));
    }

    #[test]
    fn test_unknown_chromosome_not_retained() {
        for mode in [MatchMode::Both, MatchMode::Either] {
            let filter = RegionFilter::new(regions(), mode);
            assert!(!filter.retain("chr2", &[Interval::new(120, 130)]));
        }
    }

    #[test]
    fn test_empty_footprint_not_retained() {
        let filter = RegionFilter::new(regions(), MatchMode::Both);
        assert!(!filter.retain("chr1", &[]));
    }

    #[test]
    fn test_retain_is_idempotent() {
        let filter = RegionFilter::new(regions(), MatchMode::Either);
        let footprint = [Interval::new(190, 310)];
        let first = filter.retain("chr1", &footprint);
        assert_eq!(first, filter.retain("chr1", &footprint));
    }
}
