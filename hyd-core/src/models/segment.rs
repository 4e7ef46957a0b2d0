use std::fmt;

macro_rules! ordinal_wrapper {
    ($struct:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
        #[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        #[repr(transparent)]
        pub struct $struct(pub u32);

        impl From<u32> for $struct {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for u32 {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl fmt::Display for $struct {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

ordinal_wrapper!(
    SegmentId,
    "The ordinal of a segment of the load-duration curve, counting from 1 at the peak"
);
ordinal_wrapper!(
    Period,
    "A simulation period (tick), counting from 0 for the first period"
);

impl Period {
    /// The period before this one, or None for the first period
    pub fn previous(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

/// A discrete slice of the operating period's load-duration curve
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// The segment's ordinal in 1..=N
    pub id: SegmentId,
    /// The wall-clock duration of the segment within the period, in hours
    pub hours: f64,
}

/// The baseline demand of one market during one segment
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentLoad {
    /// The segment the load applies to
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub segment: Segment,
    /// The baseline load, before applying the demand growth trend
    pub base_load: f64,
}

impl SegmentLoad {
    /// Convenience constructor
    pub fn new(id: u32, hours: f64, base_load: f64) -> Self {
        Self {
            segment: Segment {
                id: SegmentId(id),
                hours,
            },
            base_load,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_period_has_no_predecessor() {
        assert_eq!(Period(0).previous(), None);
        assert_eq!(Period(7).previous(), Some(Period(6)));
    }

    #[test]
    fn segment_load_is_flat_on_the_wire() {
        let raw = r#"{ "id": 2, "hours": 4000.0, "base_load": 300.0 }"#;
        let load = serde_json::from_str::<SegmentLoad>(raw).unwrap();
        assert_eq!(load, SegmentLoad::new(2, 4000.0, 300.0));
    }
}
