use crate::SortedCurve;
use std::{collections::VecDeque, ops::ControlFlow};
use tracing::{Level, event};

/// The bounds a plant's allocation has to respect
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    /// Maximum capacity offered in any rank
    pub nominal_capacity: f64,
    /// Maximum energy, capacity times hours summed over all ranks
    pub energy_budget: f64,
    /// Absolute slack on the energy budget to absorb rounding
    pub tolerance: f64,
}

impl Limits {
    /// Creates a new set of limits, validating all of them
    pub fn new(
        nominal_capacity: f64,
        energy_budget: f64,
        tolerance: f64,
    ) -> Result<Self, AllocationError> {
        let limits = Self {
            nominal_capacity,
            energy_budget,
            tolerance,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// All limits must be finite and non-negative
    pub fn validate(&self) -> Result<(), AllocationError> {
        if !self.nominal_capacity.is_finite() || self.nominal_capacity < 0.0 {
            return Err(AllocationError::NominalCapacity(self.nominal_capacity));
        }
        if !self.energy_budget.is_finite() || self.energy_budget < 0.0 {
            return Err(AllocationError::EnergyBudget(self.energy_budget));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(AllocationError::Tolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Why the allocation stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "reason"))]
pub enum Termination {
    /// Every rank was processed, the energy budget was not binding
    Exhausted,
    /// The energy budget ran out; `rank` and every rank below it offer nothing
    EnergyBound {
        /// The first rank that was never reached
        rank: usize,
    },
}

/// The finalized offers of a plant, indexed by rank
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    offers: Vec<f64>,
    hours: Vec<f64>,
    termination: Termination,
}

impl Allocation {
    /// The capacity offered at `rank`, counting from 1.
    ///
    /// Ranks the allocation never reached offer 0.
    pub fn offer(&self, rank: usize) -> f64 {
        rank.checked_sub(1)
            .and_then(|index| self.offers.get(index))
            .copied()
            .unwrap_or(0.0)
    }

    /// The finalized offers in rank order
    pub fn offers(&self) -> &[f64] {
        &self.offers
    }

    /// The energy delivered if every finalized offer is dispatched
    pub fn energy(&self) -> f64 {
        energy(&self.offers, &self.hours)
    }

    /// Why the allocation stopped
    pub fn termination(&self) -> Termination {
        self.termination
    }
}

type Outcome = Result<Allocation, AllocationError>;

/// The working set of an allocation in progress.
///
/// Ranks are visited from the highest residual load down. Ranks in the active
/// window have been visited and are still being filled; all of them receive the
/// same raise, so their capacities are non-increasing from the front of the
/// window to the back. Ranks leave the window from the front when they reach
/// the nominal capacity.
#[derive(Clone, Debug, PartialEq)]
pub struct AllocationState {
    active_capacity: VecDeque<f64>,
    active_hours: VecDeque<f64>,
    offers: Vec<f64>,
    offer_hours: Vec<f64>,
}

impl AllocationState {
    /// The state before any load step, with only the peak rank in the window
    pub fn start(peak_hours: f64) -> Self {
        Self {
            active_capacity: VecDeque::from([0.0]),
            active_hours: VecDeque::from([peak_hours]),
            offers: Vec::new(),
            offer_hours: Vec::new(),
        }
    }

    /// The offers finalized so far, in rank order
    pub fn finalized(&self) -> &[f64] {
        &self.offers
    }

    /// The capacities of the ranks still being filled, in rank order
    pub fn active(&self) -> impl Iterator<Item = f64> + '_ {
        self.active_capacity.iter().copied()
    }

    /// The energy committed by finalized and active ranks
    pub fn energy(&self) -> f64 {
        energy(&self.offers, &self.offer_hours)
            + self
                .active_capacity
                .iter()
                .zip(self.active_hours.iter())
                .map(|(capacity, hours)| capacity * hours)
                .sum::<f64>()
    }

    /// Shave the next slice of `load_step` off the curve, then reveal the next rank.
    ///
    /// Breaks with the finished allocation if the energy budget runs out.
    pub fn advance(
        mut self,
        (load_step, hours): (f64, f64),
        limits: &Limits,
    ) -> ControlFlow<Outcome, Self> {
        let mut remaining = load_step;

        // Each pass either finalizes the front rank or ends the step
        while let Some(&front) = self.active_capacity.front() {
            let headroom = (limits.nominal_capacity - front).max(0.0);
            let capped = headroom <= remaining;

            self = self.raise(if capped { headroom } else { remaining }, limits)?;

            if !capped {
                break;
            }
            self.finalize_front(limits.nominal_capacity);
            remaining -= headroom;
        }

        self.active_capacity.push_back(0.0);
        self.active_hours.push_back(hours);
        ControlFlow::Continue(self)
    }

    /// Move every active rank to the offers and stop
    pub fn finish(mut self, termination: Termination) -> Allocation {
        self.offers.extend(self.active_capacity);
        self.offer_hours.extend(self.active_hours);
        Allocation {
            offers: self.offers,
            hours: self.offer_hours,
            termination,
        }
    }

    fn raise(mut self, amount: f64, limits: &Limits) -> ControlFlow<Outcome, Self> {
        let window_hours = self.active_hours.iter().sum::<f64>();
        let committed = self.energy();

        if committed + amount * window_hours <= limits.energy_budget + limits.tolerance {
            self.active_capacity.iter_mut().for_each(|c| *c += amount);
            return ControlFlow::Continue(self);
        }

        let rank = self.offers.len() + self.active_capacity.len() + 1;
        if window_hours <= 0.0 {
            return ControlFlow::Break(Err(AllocationError::ZeroDivisor { rank }));
        }

        let available = ((limits.energy_budget - committed) / window_hours).max(0.0);
        self.active_capacity
            .iter_mut()
            .for_each(|c| *c += available);

        event!(
            Level::TRACE,
            rank,
            available,
            "energy budget reached, spreading the remainder over the active window"
        );
        ControlFlow::Break(Ok(self.finish(Termination::EnergyBound { rank })))
    }

    fn finalize_front(&mut self, nominal_capacity: f64) {
        if let (Some(_), Some(hours)) = (
            self.active_capacity.pop_front(),
            self.active_hours.pop_front(),
        ) {
            event!(
                Level::TRACE,
                rank = self.offers.len() + 1,
                "rank reached nominal capacity"
            );
            self.offers.push(nominal_capacity);
            self.offer_hours.push(hours);
        }
    }
}

/// Waterfill a plant's capacity into a sorted residual curve.
///
/// The allocation shaves the curve from the top, one load step at a time.
/// No rank is offered more than the nominal capacity, and the energy of all
/// offers stays within the energy budget (up to the tolerance).
pub fn allocate(curve: &SortedCurve, limits: &Limits) -> Result<Allocation, AllocationError> {
    limits.validate()?;

    let start = AllocationState::start(curve.peak_hours());
    let allocation = match curve
        .steps()
        .try_fold(start, |state, step| state.advance(step, limits))
    {
        ControlFlow::Continue(state) => state.finish(Termination::Exhausted),
        ControlFlow::Break(outcome) => outcome?,
    };

    event!(
        Level::DEBUG,
        ranks = curve.len(),
        finalized = allocation.offers.len(),
        energy = allocation.energy(),
        termination = ?allocation.termination,
        "allocation finished"
    );
    Ok(allocation)
}

fn energy(capacity: &[f64], hours: &[f64]) -> f64 {
    capacity.iter().zip(hours).map(|(c, h)| c * h).sum()
}

/// Errors raised by the allocation
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AllocationError {
    /// The nominal capacity is negative or not finite
    #[error("nominal capacity must be finite and non-negative, got {0}")]
    NominalCapacity(f64),
    /// The energy budget is negative or not finite
    #[error("energy budget must be finite and non-negative, got {0}")]
    EnergyBudget(f64),
    /// The energy tolerance is negative or not finite
    #[error("energy tolerance must be finite and non-negative, got {0}")]
    Tolerance(f64),
    /// The energy budget ran out while no active rank had any duration
    #[error("no hours to spread the remaining energy over before rank {rank}")]
    ZeroDivisor {
        /// The first rank that was never reached
        rank: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResidualLoadPoint;
    use approx::assert_abs_diff_eq;
    use hyd_core::models::SegmentId;

    fn curve(points: &[(f64, f64)]) -> SortedCurve {
        SortedCurve::new(
            points
                .iter()
                .enumerate()
                .map(|(index, &(residual_load, hours))| ResidualLoadPoint {
                    residual_load,
                    hours,
                    origin: Some(SegmentId(index as u32 + 1)),
                })
                .collect(),
        )
    }

    fn three_steps() -> SortedCurve {
        curve(&[(500.0, 2000.0), (300.0, 4000.0), (100.0, 2760.0)])
    }

    #[test]
    fn test_unbounded_shaves_everything() {
        let limits = Limits::new(1000.0, 1e9, 1e-6).unwrap();
        let allocation = allocate(&three_steps(), &limits).unwrap();

        assert_eq!(allocation.offers(), &[500.0, 300.0, 100.0, 0.0]);
        assert_eq!(allocation.termination(), Termination::Exhausted);
        assert_abs_diff_eq!(allocation.energy(), 2_476_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_capacity_cascades() {
        let limits = Limits::new(200.0, 1e9, 1e-6).unwrap();
        let allocation = allocate(&three_steps(), &limits).unwrap();

        assert_eq!(allocation.offers(), &[200.0, 200.0, 100.0, 0.0]);
        assert_eq!(allocation.termination(), Termination::Exhausted);
    }

    #[test]
    fn test_energy_truncates() {
        let limits = Limits::new(1000.0, 800_000.0, 1e-6).unwrap();
        let allocation = allocate(&three_steps(), &limits).unwrap();

        assert_eq!(allocation.termination(), Termination::EnergyBound { rank: 3 });
        assert_eq!(allocation.offers().len(), 2);
        assert_abs_diff_eq!(allocation.offer(1), 200.0 + 400_000.0 / 6000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(allocation.offer(2), 400_000.0 / 6000.0, epsilon = 1e-9);
        assert_eq!(allocation.offer(3), 0.0);
        assert_eq!(allocation.offer(4), 0.0);
        assert_abs_diff_eq!(allocation.energy(), 800_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_limits() {
        let allocation = allocate(&three_steps(), &Limits::new(0.0, 1e9, 0.0).unwrap()).unwrap();
        assert!(allocation.offers().iter().all(|&offer| offer == 0.0));

        let allocation = allocate(&three_steps(), &Limits::new(500.0, 0.0, 0.0).unwrap()).unwrap();
        assert_eq!(allocation.termination(), Termination::EnergyBound { rank: 2 });
        assert_eq!(allocation.offers(), &[0.0]);
    }

    #[test]
    fn test_ties_cap_together() {
        let sorted = curve(&[(300.0, 10.0), (300.0, 10.0), (100.0, 10.0)]);
        let allocation = allocate(&sorted, &Limits::new(150.0, 1e9, 0.0).unwrap()).unwrap();
        assert_eq!(allocation.offers(), &[150.0, 150.0, 100.0, 0.0]);
    }

    #[test]
    fn test_anchor_only() {
        let sorted = SortedCurve::new(Vec::new());
        let allocation = allocate(&sorted, &Limits::new(100.0, 100.0, 0.0).unwrap()).unwrap();
        assert_eq!(allocation.offers(), &[0.0]);
        assert_eq!(allocation.energy(), 0.0);
    }

    #[test]
    fn test_invalid_limits() {
        assert_eq!(
            Limits::new(-1.0, 0.0, 0.0),
            Err(AllocationError::NominalCapacity(-1.0))
        );
        assert_eq!(
            Limits::new(1.0, f64::INFINITY, 0.0),
            Err(AllocationError::EnergyBudget(f64::INFINITY))
        );
        assert!(matches!(
            Limits::new(1.0, 1.0, f64::NAN),
            Err(AllocationError::Tolerance(_))
        ));
    }

    #[test]
    fn test_state_advances_by_value() {
        let limits = Limits::new(1000.0, 1e9, 0.0).unwrap();
        let state = AllocationState::start(2.0);

        let ControlFlow::Continue(state) = state.advance((10.0, 3.0), &limits) else {
            panic!("budget should not bind");
        };
        assert_eq!(state.active().collect::<Vec<_>>(), vec![10.0, 0.0]);
        assert!(state.finalized().is_empty());
        assert_eq!(state.energy(), 20.0);
    }
}
