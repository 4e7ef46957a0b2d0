use super::{Lifetime, SegmentId};

/// The intermittent technologies whose infeed is netted out of the load
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum IntermittentKind {
    /// Onshore wind
    Wind,
    /// Photovoltaic
    Solar,
    /// Offshore wind
    WindOffshore,
}

/// Installed intermittent capacity of one technology in a market
///
/// The availability fractions describe how much of the installed capacity can be
/// expected to produce in the base segment (the lowest load) and in the peak
/// segment (the highest load).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntermittentTechnology {
    /// The technology
    pub kind: IntermittentKind,
    /// Installed capacity
    pub capacity: f64,
    /// Fraction of the capacity available in the base segment
    pub base_availability: f64,
    /// Fraction of the capacity available in the peak segment
    pub peak_availability: f64,
    /// When the capacity is in operation
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub lifetime: Lifetime,
}

/// The aggregate intermittent fleet of a market
///
/// Base and peak availabilities are the capacity-weighted averages of the
/// individual technologies, so `total_capacity * base_availability` is the fleet's
/// expected infeed in the base segment.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntermittentProfile {
    /// Capacity-weighted availability in the base segment
    pub base_availability: f64,
    /// Capacity-weighted availability in the peak segment
    pub peak_availability: f64,
    /// Total installed intermittent capacity
    pub total_capacity: f64,
}

impl IntermittentProfile {
    /// A market without intermittent generation
    pub fn none() -> Self {
        Self::default()
    }

    /// Aggregate a collection of technologies into a single profile
    pub fn aggregate<'a>(
        technologies: impl IntoIterator<Item = &'a IntermittentTechnology>,
    ) -> Result<Self, IntermittentError> {
        let technologies = technologies.into_iter().collect::<Vec<_>>();

        for technology in technologies.iter() {
            validate_technology(technology)?;
        }

        let total_capacity = technologies.iter().map(|t| t.capacity).sum::<f64>();
        if total_capacity == 0.0 {
            return Ok(Self::none());
        }

        let (base_availability, peak_availability) =
            technologies.iter().fold((0.0, 0.0), |(base, peak), t| {
                let share = t.capacity / total_capacity;
                (
                    base + share * t.base_availability,
                    peak + share * t.peak_availability,
                )
            });

        Ok(Self {
            base_availability,
            peak_availability,
            total_capacity,
        })
    }

    /// The availability factor applied to the fleet in segment `id` of `n`.
    ///
    /// The factor moves linearly with the segment ordinal between the two
    /// availabilities. The last segment always takes the base availability.
    pub fn factor(&self, id: SegmentId, n: usize) -> f64 {
        if id.0 as usize == n {
            self.base_availability
        } else {
            let portion = (n as f64 - id.0 as f64) / (n as f64 - 1.0);
            self.peak_availability - portion * (self.peak_availability - self.base_availability)
        }
    }

    /// The estimated intermittent infeed in segment `id` of `n`
    pub fn infeed(&self, id: SegmentId, n: usize) -> f64 {
        self.factor(id, n) * self.total_capacity
    }
}

fn validate_technology(technology: &IntermittentTechnology) -> Result<(), IntermittentError> {
    let IntermittentTechnology {
        kind,
        capacity,
        base_availability,
        peak_availability,
        ..
    } = technology;

    if !capacity.is_finite() || *capacity < 0.0 {
        return Err(IntermittentError::Capacity(*kind, *capacity));
    }
    for availability in [base_availability, peak_availability] {
        if !(0.0..=1.0).contains(availability) {
            return Err(IntermittentError::Availability(*kind, *availability));
        }
    }
    Ok(())
}

/// Errors raised when aggregating the intermittent fleet
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum IntermittentError {
    /// A capacity is negative or not finite
    #[error("invalid installed capacity {1} for {0:?}")]
    Capacity(IntermittentKind, f64),
    /// An availability fraction lies outside of [0, 1]
    #[error("availability {1} for {0:?} is outside of [0, 1]")]
    Availability(IntermittentKind, f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn technology(
        kind: IntermittentKind,
        capacity: f64,
        base: f64,
        peak: f64,
    ) -> IntermittentTechnology {
        IntermittentTechnology {
            kind,
            capacity,
            base_availability: base,
            peak_availability: peak,
            lifetime: Lifetime::default(),
        }
    }

    #[test]
    fn test_capacity_weighted_aggregate() {
        let fleet = [
            technology(IntermittentKind::Wind, 300.0, 0.2, 0.1),
            technology(IntermittentKind::Solar, 100.0, 0.0, 0.4),
        ];
        let profile = IntermittentProfile::aggregate(&fleet).unwrap();

        assert_eq!(profile.total_capacity, 400.0);
        assert!((profile.base_availability - 0.15).abs() < 1e-12);
        assert!((profile.peak_availability - 0.175).abs() < 1e-12);
    }

    #[test]
    fn test_empty_fleet() {
        let fleet: [IntermittentTechnology; 0] = [];
        let profile = IntermittentProfile::aggregate(&fleet).unwrap();
        assert_eq!(profile, IntermittentProfile::none());

        let idle = [technology(IntermittentKind::WindOffshore, 0.0, 0.5, 0.5)];
        assert_eq!(
            IntermittentProfile::aggregate(&idle).unwrap(),
            IntermittentProfile::none()
        );
    }

    #[test]
    fn test_invalid_technologies() {
        let fleet = [technology(IntermittentKind::Wind, -1.0, 0.2, 0.1)];
        assert_eq!(
            IntermittentProfile::aggregate(&fleet).unwrap_err(),
            IntermittentError::Capacity(IntermittentKind::Wind, -1.0)
        );

        let fleet = [technology(IntermittentKind::Solar, 10.0, 0.2, 1.5)];
        assert_eq!(
            IntermittentProfile::aggregate(&fleet).unwrap_err(),
            IntermittentError::Availability(IntermittentKind::Solar, 1.5)
        );
    }

    #[test]
    fn test_factor_interpolation() {
        let profile = IntermittentProfile {
            base_availability: 0.1,
            peak_availability: 0.5,
            total_capacity: 100.0,
        };

        // first segment: the full (peak - base) range is subtracted from the peak
        assert!((profile.factor(SegmentId(1), 5) - 0.1).abs() < 1e-12);
        // halfway
        assert!((profile.factor(SegmentId(3), 5) - 0.3).abs() < 1e-12);
        assert!((profile.factor(SegmentId(4), 5) - 0.4).abs() < 1e-12);
        // the last segment never interpolates
        assert_eq!(profile.factor(SegmentId(5), 5), 0.1);
        assert!((profile.infeed(SegmentId(4), 5) - 40.0).abs() < 1e-9);
    }
}
