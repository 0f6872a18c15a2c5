//! Claimed token index ranges.
//!
//! Every match pass records the token indices it consumed here. Ranges are
//! kept sorted and pairwise disjoint, so membership and overlap checks are
//! binary searches and the non-overlap invariant is a single linear scan.

use std::ops::Range;

/// Sorted set of disjoint, half-open token index ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    ranges: Vec<Range<usize>>,
}

impl ClaimSet {
    /// Create an empty claim set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first stored range whose end is past `index`.
    fn first_ending_after(&self, index: usize) -> usize {
        self.ranges.partition_point(|r| r.end <= index)
    }

    /// Whether any index in `range` is already claimed.
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        if range.is_empty() {
            return false;
        }
        let pos = self.first_ending_after(range.start);
        self.ranges
            .get(pos)
            .is_some_and(|r| r.start < range.end)
    }

    /// Whether a single index is claimed.
    pub fn contains(&self, index: usize) -> bool {
        self.overlaps(&(index..index + 1))
    }

    /// Claim `range`. Returns `false` (and claims nothing) if any index in it
    /// is already claimed.
    pub fn claim(&mut self, range: Range<usize>) -> bool {
        if range.is_empty() || self.overlaps(&range) {
            return false;
        }
        let pos = self.first_ending_after(range.start);
        self.ranges.insert(pos, range);
        true
    }

    /// Number of claimed ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether nothing has been claimed.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total number of claimed indices.
    pub fn claimed_indices(&self) -> usize {
        self.ranges.iter().map(|r| r.len()).sum()
    }

    /// Claimed ranges in ascending order.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Check that stored ranges are sorted and pairwise disjoint.
    pub fn is_disjoint(&self) -> bool {
        self.ranges.windows(2).all(|w| w[0].end <= w[1].start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_contains() {
        let mut claims = ClaimSet::new();
        assert!(claims.claim(2..4));
        assert!(claims.contains(2));
        assert!(claims.contains(3));
        assert!(!claims.contains(4));
        assert!(!claims.contains(1));
    }

    #[test]
    fn test_overlapping_claim_rejected() {
        let mut claims = ClaimSet::new();
        assert!(claims.claim(2..5));
        assert!(!claims.claim(4..6));
        assert!(!claims.claim(0..3));
        assert!(claims.claim(5..6));
        assert!(claims.claim(0..2));
        assert_eq!(claims.len(), 3);
        assert_eq!(claims.claimed_indices(), 6);
    }

    #[test]
    fn test_out_of_order_claims_stay_sorted() {
        let mut claims = ClaimSet::new();
        for range in [(8..9), (0..1), (4..6), (2..3)] {
            assert!(claims.claim(range));
        }
        let starts: Vec<usize> = claims.ranges().iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![0, 2, 4, 8]);
        assert!(claims.is_disjoint());
    }

    #[test]
    fn test_empty_range_never_overlaps() {
        let mut claims = ClaimSet::new();
        claims.claim(0..10);
        assert!(!claims.overlaps(&(5..5)));
        assert!(!claims.claim(3..3));
    }

    #[test]
    fn test_overlap_query_between_ranges() {
        let mut claims = ClaimSet::new();
        claims.claim(0..2);
        claims.claim(6..8);
        assert!(!claims.overlaps(&(2..6)));
        assert!(claims.overlaps(&(2..7)));
        assert!(claims.overlaps(&(1..3)));
    }
}
