use super::Period;

/// Whether an offer is computed for the period being cleared or ahead of time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Outlook {
    /// The period currently being cleared; uses realized plant status
    #[default]
    Current,
    /// A future period; uses expected plant status
    Forecast,
}

/// The operating window of a generation asset
///
/// An asset operates from the period its construction finishes. It stops at its
/// dismantling period once one has been decided, while forecasts rely on its
/// expected end of life instead.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lifetime {
    /// The first period in which construction has finished
    #[cfg_attr(feature = "serde", serde(default))]
    pub operational_from: Period,
    /// The period at which the asset was dismantled, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub dismantled_at: Option<Period>,
    /// The period at which the asset is expected to reach its end of life, if known
    #[cfg_attr(feature = "serde", serde(default))]
    pub expected_end_of_life: Option<Period>,
}

impl Lifetime {
    /// Construction has finished and the asset has not (yet) been dismantled
    pub fn is_operational(&self, period: Period) -> bool {
        self.operational_from <= period && self.dismantled_at.is_none_or(|end| end > period)
    }

    /// Construction will have finished and the asset is not expected to have retired
    pub fn is_expected_operational(&self, period: Period) -> bool {
        self.operational_from <= period && self.expected_end_of_life.is_none_or(|end| end > period)
    }

    /// Dispatch to the check that matches the outlook
    pub fn is_available(&self, period: Period, outlook: Outlook) -> bool {
        match outlook {
            Outlook::Current => self.is_operational(period),
            Outlook::Forecast => self.is_expected_operational(period),
        }
    }
}

/// A dispatchable hydro plant
///
/// The plant's only static input to the offer computation is its nominal
/// capacity, which caps the offer in every segment. The energy it may deliver
/// is a property of the market and period, not of the plant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HydroPlant {
    /// A human-readable name, used for reporting
    pub name: String,
    /// Maximum power output
    pub nominal_capacity: f64,
    /// When the plant is in operation
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub lifetime: Lifetime,
}

impl HydroPlant {
    /// A plant that has always been and will always be operational
    pub fn new(name: impl Into<String>, nominal_capacity: f64) -> Self {
        Self {
            name: name.into(),
            nominal_capacity,
            lifetime: Lifetime::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifetime(from: u32, dismantled: Option<u32>, expected: Option<u32>) -> Lifetime {
        Lifetime {
            operational_from: Period(from),
            dismantled_at: dismantled.map(Period),
            expected_end_of_life: expected.map(Period),
        }
    }

    #[test]
    fn test_under_construction() {
        let window = lifetime(3, None, None);
        assert!(!window.is_operational(Period(2)));
        assert!(window.is_operational(Period(3)));
        assert!(!window.is_expected_operational(Period(2)));
    }

    #[test]
    fn test_dismantled() {
        let window = lifetime(0, Some(10), Some(40));
        assert!(window.is_operational(Period(9)));
        assert!(!window.is_operational(Period(10)));
        // forecasts look at the expected end of life only
        assert!(window.is_expected_operational(Period(10)));
        assert!(!window.is_expected_operational(Period(40)));
    }

    #[test]
    fn test_outlook_dispatch() {
        let window = lifetime(0, Some(5), Some(20));
        assert!(!window.is_available(Period(6), Outlook::Current));
        assert!(window.is_available(Period(6), Outlook::Forecast));
    }
}
