use serde::{Deserialize, Serialize};

/// A 0-based, half-open genomic interval `[start, end)`.
///
/// Empty intervals (`start == end`) are allowed and describe a position between two
/// bases, which is how insertions are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: u64,
    pub end: u64,
}

impl Interval {
    /// Create an interval, swapping the coordinates if they are reversed
    #[must_use]
    pub fn new(start: u64, end: u64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Empty interval anchored at `pos`
    #[must_use]
    pub fn point(pos: u64) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `pos` is one of the bases covered by this interval
    #[must_use]
    pub fn contains_position(&self, pos: u64) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Whether `other` lies entirely inside this interval.
    ///
    /// An empty `other` is contained when its anchor is a covered base.
    #[must_use]
    pub fn contains(&self, other: &Interval) -> bool {
        if other.is_empty() {
            self.contains_position(other.start)
        } else {
            self.start <= other.start && other.end <= self.end
        }
    }

    /// The first and last base of the interval; both are the anchor for empty intervals
    #[must_use]
    pub fn endpoints(&self) -> (u64, u64) {
        (self.start, self.end.saturating_sub(1).max(self.start))
    }

    /// Smallest interval covering all of `intervals`, or `None` if there are none
    pub fn hull<'a, I>(intervals: I) -> Option<Interval>
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        intervals.into_iter().fold(None, |acc, iv| match acc {
            None => Some(*iv),
            Some(h) => Some(Interval {
                start: h.start.min(iv.start),
                end: h.end.max(iv.end),
            }),
        })
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_coordinates() {
        assert_eq!(Interval::new(10, 5), Interval { start: 5, end: 10 });
    }

    #[test]
    fn test_contains() {
        let region = Interval::new(100, 200);
        assert!(region.contains(&Interval::new(100, 200)));
        assert!(region.contains(&Interval::new(150, 160)));
        assert!(!region.contains(&Interval::new(150, 201)));
        assert!(!region.contains(&Interval::new(99, 120)));
    }

    #[test]
    fn test_contains_empty_interval() {
        let region = Interval::new(100, 200);
        assert!(region.contains(&Interval::point(100)));
        assert!(region.contains(&Interval::point(199)));
        assert!(!region.contains(&Interval::point(200)));
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(Interval::new(10, 20).endpoints(), (10, 19));
        assert_eq!(Interval::new(10, 11).endpoints(), (10, 10));
        assert_eq!(Interval::point(10).endpoints(), (10, 10));
    }

    #[test]
    fn test_hull() {
        let ivs = [Interval::new(10, 12), Interval::point(30), Interval::new(5, 8)];
        assert_eq!(Interval::hull(&ivs), Some(Interval::new(5, 30)));
        assert_eq!(Interval::hull(&[]), None);
    }
}
