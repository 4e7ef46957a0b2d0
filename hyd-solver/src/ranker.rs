use crate::ResidualLoadPoint;
use hyd_core::models::{SegmentId, SegmentMap};

/// Residual load points ordered from the highest load down
///
/// Ranks count from 1 at the highest residual load. Points with equal loads keep
/// their segment order and their own rank, so every segment that entered the
/// curve can be looked up again.
#[derive(Clone, Debug)]
pub struct SortedCurve {
    points: Vec<ResidualLoadPoint>,
    ranks: SegmentMap<usize>,
}

impl SortedCurve {
    /// Rank a collection of points.
    ///
    /// The zero-load anchor is appended if it is not already present, so the
    /// sorted curve is never empty.
    pub fn new(mut points: Vec<ResidualLoadPoint>) -> Self {
        if !points.iter().any(|point| point.origin.is_none()) {
            points.push(ResidualLoadPoint::ANCHOR);
        }

        // sort_by is stable, which keeps tied loads in segment order
        points.sort_by(|a, b| b.residual_load.total_cmp(&a.residual_load));

        let ranks = points
            .iter()
            .enumerate()
            .filter_map(|(index, point)| point.origin.map(|id| (id, index + 1)))
            .collect();

        Self { points, ranks }
    }

    /// The number of ranks, M, including the anchor
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true, provided for completeness
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The rank of a segment, if it made it into the curve
    pub fn rank_of(&self, segment: SegmentId) -> Option<usize> {
        self.ranks.get(&segment).copied()
    }

    /// The point at a rank
    pub fn point(&self, rank: usize) -> Option<&ResidualLoadPoint> {
        self.points.get(rank.checked_sub(1)?)
    }

    /// The points in rank order
    pub fn points(&self) -> &[ResidualLoadPoint] {
        &self.points
    }

    /// The duration of the highest-ranked point
    pub fn peak_hours(&self) -> f64 {
        self.points.first().map_or(0.0, |point| point.hours)
    }

    /// The load steps between consecutive ranks.
    ///
    /// Yields `(load_step, hours)` for ranks 2..=M, where `load_step` is the drop
    /// in residual load from the previous rank and `hours` is the duration of the
    /// rank being revealed.
    pub fn steps(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .windows(2)
            .map(|pair| (pair[0].residual_load - pair[1].residual_load, pair[1].hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(load: f64, hours: f64, id: u32) -> ResidualLoadPoint {
        ResidualLoadPoint {
            residual_load: load,
            hours,
            origin: Some(SegmentId(id)),
        }
    }

    #[test]
    fn test_descending_with_ranks() {
        let sorted = SortedCurve::new(vec![
            point(100.0, 3.0, 1),
            point(500.0, 1.0, 2),
            point(300.0, 2.0, 3),
            ResidualLoadPoint::ANCHOR,
        ]);

        assert_eq!(sorted.len(), 4);
        assert_eq!(sorted.rank_of(SegmentId(2)), Some(1));
        assert_eq!(sorted.rank_of(SegmentId(3)), Some(2));
        assert_eq!(sorted.rank_of(SegmentId(1)), Some(3));
        assert_eq!(sorted.rank_of(SegmentId(4)), None);
        assert_eq!(sorted.point(4), Some(&ResidualLoadPoint::ANCHOR));
        assert_eq!(sorted.point(0), None);
        assert_eq!(sorted.peak_hours(), 1.0);

        let steps = sorted.steps().collect::<Vec<_>>();
        assert_eq!(steps, vec![(200.0, 2.0), (200.0, 3.0), (100.0, 0.0)]);
    }

    #[test]
    fn test_ties_keep_one_entry_per_segment() {
        let sorted = SortedCurve::new(vec![
            point(250.0, 10.0, 1),
            point(250.0, 20.0, 2),
            point(250.0, 30.0, 3),
        ]);

        assert_eq!(sorted.len(), 4);
        assert_eq!(sorted.rank_of(SegmentId(1)), Some(1));
        assert_eq!(sorted.rank_of(SegmentId(2)), Some(2));
        assert_eq!(sorted.rank_of(SegmentId(3)), Some(3));

        let hours = sorted.points().iter().map(|p| p.hours).collect::<Vec<_>>();
        assert_eq!(hours, vec![10.0, 20.0, 30.0, 0.0]);
    }

    #[test]
    fn test_anchor_only() {
        let sorted = SortedCurve::new(Vec::new());
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted.steps().count(), 0);
        assert_eq!(sorted.peak_hours(), 0.0);
    }
}
