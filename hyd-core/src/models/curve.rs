use super::{Segment, SegmentId, SegmentLoad};

/// A market's segmented load-duration curve
///
/// The curve holds one baseline load per segment. For the offer computation it must:
/// - Contain at least two segments (the infeed interpolation divides by N - 1)
/// - Number its segments exactly 1..=N, each once
/// - Have finite loads and finite, non-negative durations
///
/// The segments are stored in id order regardless of the order they were provided in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "LoadDurationCurveDto", into = "LoadDurationCurveDto")
)]
pub struct LoadDurationCurve(Vec<SegmentLoad>);

impl LoadDurationCurve {
    /// Creates a new curve from a collection of segment loads, validating all constraints
    pub fn new(loads: Vec<SegmentLoad>) -> Result<Self, LoadDurationCurveError> {
        Self::try_from(LoadDurationCurveDto(loads))
    }

    /// Creates a new curve without validating the segment loads
    ///
    /// # Safety
    ///
    /// This function bypasses all validation checks. The caller must guarantee that
    /// the loads satisfy all requirements validated by [`LoadDurationCurve::try_from`],
    /// including the ordering by segment id. The infeed interpolation in particular
    /// divides by N - 1 and will produce non-finite loads for a single segment.
    pub unsafe fn new_unchecked(loads: Vec<SegmentLoad>) -> Self {
        Self(loads)
    }

    /// The number of segments, N
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated curve, provided for completeness
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the segment loads in id order
    pub fn iter(&self) -> std::slice::Iter<'_, SegmentLoad> {
        self.0.iter()
    }

    /// The segments of the curve in id order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.0.iter().map(|load| &load.segment)
    }

    /// The segment ids of the curve in id order
    pub fn ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.segments().map(|segment| segment.id)
    }

    /// Look up a segment by its id
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        // Ids are exactly 1..=N and sorted, so the id doubles as an index
        let index = (id.0 as usize).checked_sub(1)?;
        self.0.get(index).map(|load| &load.segment)
    }

    /// The total duration of all segments, in hours
    pub fn total_hours(&self) -> f64 {
        self.segments().map(|segment| segment.hours).sum()
    }

    /// Consumes the curve and returns the underlying segment loads
    pub fn into_loads(self) -> Vec<SegmentLoad> {
        self.0
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug)]
pub struct LoadDurationCurveDto(pub Vec<SegmentLoad>);

impl From<LoadDurationCurve> for LoadDurationCurveDto {
    fn from(value: LoadDurationCurve) -> Self {
        Self(value.0)
    }
}

impl TryFrom<LoadDurationCurveDto> for LoadDurationCurve {
    type Error = LoadDurationCurveError;

    /// Attempts to create a LoadDurationCurve from a DTO, validating all constraints
    ///
    /// # Validation
    ///
    /// This function validates that:
    /// 1. There are at least two segments
    /// 2. No load or duration is NaN or infinite, and no duration is negative
    /// 3. Every id lies in 1..=N and appears exactly once
    ///
    /// # Errors
    ///
    /// Returns `LoadDurationCurveError` if any validation fails.
    fn try_from(value: LoadDurationCurveDto) -> Result<Self, Self::Error> {
        let mut loads = value.0;
        let n = loads.len();

        if n <= 1 {
            return Err(LoadDurationCurveError::TooFewSegments(n));
        }

        for SegmentLoad {
            segment: Segment { id, hours },
            base_load,
        } in loads.iter()
        {
            if hours.is_nan() || base_load.is_nan() {
                return Err(LoadDurationCurveError::NaN(*id));
            }
            if hours.is_infinite() || base_load.is_infinite() {
                return Err(LoadDurationCurveError::Infinity(*id));
            }
            if *hours < 0.0 {
                return Err(LoadDurationCurveError::NegativeDuration(*id));
            }
            if id.0 == 0 || id.0 as usize > n {
                return Err(LoadDurationCurveError::OutOfRange { id: *id, n });
            }
        }

        // Ids are in range and there are exactly N of them, so after sorting any
        // gap in 1..=N must show up as a repeated neighbour.
        loads.sort_by_key(|load| load.segment.id);
        for pair in loads.windows(2) {
            if pair[0].segment.id == pair[1].segment.id {
                return Err(LoadDurationCurveError::Duplicate(pair[0].segment.id));
            }
        }

        Ok(Self(loads))
    }
}

impl<'a> IntoIterator for &'a LoadDurationCurve {
    type Item = &'a SegmentLoad;
    type IntoIter = std::slice::Iter<'a, SegmentLoad>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Errors that can occur when creating or validating a LoadDurationCurve
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LoadDurationCurveError {
    /// The curve needs at least two segments
    #[error("a load-duration curve needs at least 2 segments, got {0}")]
    TooFewSegments(usize),
    /// A load or duration is NaN
    #[error("NaN value encountered in segment {0}")]
    NaN(SegmentId),
    /// A load or duration is infinite
    #[error("infinite value encountered in segment {0}")]
    Infinity(SegmentId),
    /// A duration is negative
    #[error("segment {0} has a negative duration")]
    NegativeDuration(SegmentId),
    /// An id lies outside of 1..=N
    #[error("segment id {id} is outside of 1..={n}")]
    OutOfRange {
        /// The offending id
        id: SegmentId,
        /// The number of segments in the curve
        n: usize,
    },
    /// An id appears more than once
    #[error("segment {0} appears more than once")]
    Duplicate(SegmentId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loads(data: &[(u32, f64, f64)]) -> Vec<SegmentLoad> {
        data.iter()
            .map(|&(id, hours, load)| SegmentLoad::new(id, hours, load))
            .collect()
    }

    #[test]
    fn test_too_few_segments() {
        assert_eq!(
            LoadDurationCurve::new(vec![]).unwrap_err(),
            LoadDurationCurveError::TooFewSegments(0)
        );
        assert_eq!(
            LoadDurationCurve::new(loads(&[(1, 8760.0, 100.0)])).unwrap_err(),
            LoadDurationCurveError::TooFewSegments(1)
        );
    }

    #[test]
    fn test_sorts_by_id() {
        let curve =
            LoadDurationCurve::new(loads(&[(2, 10.0, 5.0), (3, 20.0, 1.0), (1, 5.0, 9.0)]))
                .unwrap();
        assert_eq!(curve.ids().map(u32::from).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(curve.segment(SegmentId(3)).unwrap().hours, 20.0);
        assert_eq!(curve.segment(SegmentId(0)), None);
        assert_eq!(curve.segment(SegmentId(4)), None);
        assert_eq!(curve.total_hours(), 35.0);
    }

    #[test]
    fn test_duplicate_ids() {
        assert_eq!(
            LoadDurationCurve::new(loads(&[(1, 10.0, 5.0), (1, 20.0, 1.0), (2, 5.0, 9.0)]))
                .unwrap_err(),
            LoadDurationCurveError::Duplicate(SegmentId(1))
        );
    }

    #[test]
    fn test_out_of_range_ids() {
        assert_eq!(
            LoadDurationCurve::new(loads(&[(1, 10.0, 5.0), (3, 20.0, 1.0)])).unwrap_err(),
            LoadDurationCurveError::OutOfRange {
                id: SegmentId(3),
                n: 2
            }
        );
        assert_eq!(
            LoadDurationCurve::new(loads(&[(0, 10.0, 5.0), (1, 20.0, 1.0)])).unwrap_err(),
            LoadDurationCurveError::OutOfRange {
                id: SegmentId(0),
                n: 2
            }
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            LoadDurationCurve::new(loads(&[(1, f64::NAN, 5.0), (2, 20.0, 1.0)])).unwrap_err(),
            LoadDurationCurveError::NaN(SegmentId(1))
        );
        assert_eq!(
            LoadDurationCurve::new(loads(&[(1, 10.0, 5.0), (2, 20.0, f64::INFINITY)]))
                .unwrap_err(),
            LoadDurationCurveError::Infinity(SegmentId(2))
        );
        assert_eq!(
            LoadDurationCurve::new(loads(&[(1, 10.0, 5.0), (2, -1.0, 1.0)])).unwrap_err(),
            LoadDurationCurveError::NegativeDuration(SegmentId(2))
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let raw = r#"[
            { "id": 1, "hours": 2000.0, "base_load": 500.0 },
            { "id": 2, "hours": 6760.0, "base_load": 100.0 }
        ]"#;
        assert!(serde_json::from_str::<LoadDurationCurve>(raw).is_ok());

        let raw = r#"[{ "id": 1, "hours": 8760.0, "base_load": 500.0 }]"#;
        assert!(serde_json::from_str::<LoadDurationCurve>(raw).is_err());
    }
}
