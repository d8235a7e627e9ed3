use std::collections::HashMap;

use crate::core::interval::Interval;

/// A read-only set of genomic regions, keyed by chromosome.
///
/// Intervals on each chromosome are kept sorted and merged (overlapping or abutting
/// intervals collapse into one), so every query is a single binary search.
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: HashMap<String, Vec<Interval>>,
}

impl RegionSet {
    /// Build a region set from `(chromosome, interval)` pairs in any order
    pub fn from_intervals<I, S>(intervals: I) -> Self
    where
        I: IntoIterator<Item = (S, Interval)>,
        S: Into<String>,
    {
        let mut regions: HashMap<String, Vec<Interval>> = HashMap::new();
        for (chrom, iv) in intervals {
            regions.entry(chrom.into()).or_default().push(iv);
        }
        for ivs in regions.values_mut() {
            merge_in_place(ivs);
        }
        regions.retain(|_, ivs| !ivs.is_empty());
        Self { regions }
    }

    /// Number of chromosomes with at least one region
    #[must_use]
    pub fn chromosome_count(&self) -> usize {
        self.regions.len()
    }

    /// Total number of merged regions
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.region_count() == 0
    }

    /// Merged regions on `chrom`, sorted by start
    #[must_use]
    pub fn regions(&self, chrom: &str) -> &[Interval] {
        self.regions
            .get(chrom)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the base at `pos` lies inside a region on `chrom`
    #[must_use]
    pub fn contains_point(&self, chrom: &str, pos: u64) -> bool {
        self.candidate(chrom, pos)
            .is_some_and(|r| r.contains_position(pos))
    }

    /// Whether `interval` lies entirely inside one region on `chrom`
    #[must_use]
    pub fn contains_interval(&self, chrom: &str, interval: &Interval) -> bool {
        self.candidate(chrom, interval.start)
            .is_some_and(|r| r.contains(interval))
    }

    /// The last region starting at or before `pos`; the only one that can cover it
    fn candidate(&self, chrom: &str, pos: u64) -> Option<&Interval> {
        let ivs = self.regions.get(chrom)?;
        let idx = ivs.partition_point(|r| r.start <= pos);
        if idx == 0 {
            None
        } else {
            ivs.get(idx - 1)
        }
    }
}

fn merge_in_place(ivs: &mut Vec<Interval>) {
    ivs.retain(|iv| !iv.is_empty());
    ivs.sort_unstable();

    let mut merged: Vec<Interval> = Vec::with_capacity(ivs.len());
    for iv in ivs.drain(..) {
        match merged.last_mut() {
            Some(last) if iv.start <= last.end => last.end = last.end.max(iv.end),
            _ => merged.push(iv),
        }
    }
    *ivs = merged;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> RegionSet {
        RegionSet::from_intervals(vec![
            ("chr1", Interval::new(100, 200)),
            ("chr1", Interval::new(150, 250)),
            ("chr1", Interval::new(250, 300)),
            ("chr1", Interval::new(500, 600)),
            ("chr2", Interval::new(0, 10)),
        ])
    }

    #[test]
    fn test_merges_overlapping_and_abutting() {
        let regions = set();
        assert_eq!(
            regions.regions("chr1"),
            &[Interval::new(100, 300), Interval::new(500, 600)]
        );
        assert_eq!(regions.region_count(), 3);
        assert_eq!(regions.chromosome_count(), 2);
    }

    #[test]
    fn test_contains_point() {
        let regions = set();
        assert!(regions.contains_point("chr1", 100));
        assert!(regions.contains_point("chr1", 299));
        assert!(!regions.contains_point("chr1", 300));
        assert!(!regions.contains_point("chr1", 99));
        assert!(regions.contains_point("chr1", 550));
        assert!(!regions.contains_point("chr1", 450));
    }

    #[test]
    fn test_contains_interval() {
        let regions = set();
        assert!(regions.contains_interval("chr1", &Interval::new(120, 280)));
        assert!(!regions.contains_interval("chr1", &Interval::new(280, 520)));
        assert!(regions.contains_interval("chr2", &Interval::point(5)));
    }

    #[test]
    fn test_unknown_chromosome() {
        let regions = set();
        assert!(!regions.contains_point("chrX", 150));
        assert!(!regions.contains_interval("chrX", &Interval::new(120, 130)));
        assert!(regions.regions("chrX").is_empty());
    }

    #[test]
    fn test_empty_regions_dropped() {
        let regions = RegionSet::from_intervals(vec![("chr1", Interval::point(5))]);
        assert!(!regions.contains_point("chr1", 5));
        assert_eq!(regions.region_count(), 0);
        assert!(regions.is_empty());
        assert_eq!(regions.chromosome_count(), 0);
    }
}
