//! The radial distance interval of a search.

use crate::error::SearchError;
use halite_core::ToleranceComparer;
use std::cmp::Ordering;

/// A distance interval with independently open or closed bounds.
///
/// All bound checks run through the comparer, so a distance within
/// tolerance of a closed bound counts as on the bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialConstraint {
    min: f64,
    max: f64,
    min_inclusive: bool,
    max_inclusive: bool,
    comparer: ToleranceComparer,
}

impl RadialConstraint {
    /// Build a constraint from explicit bounds.
    ///
    /// Bounds must be finite and non-inverted.
    pub fn new(
        min: f64,
        max: f64,
        min_inclusive: bool,
        max_inclusive: bool,
        comparer: ToleranceComparer,
    ) -> Result<Self, SearchError> {
        for value in [min, max] {
            if !value.is_finite() {
                return Err(SearchError::NonFiniteConstraint { value });
            }
        }
        if min > max {
            return Err(SearchError::InvertedConstraint { min, max });
        }
        Ok(Self {
            min,
            max,
            min_inclusive,
            max_inclusive,
            comparer,
        })
    }

    /// The interval `(0, max]`: everything up to and including `max`,
    /// excluding the origin site itself.
    pub fn up_to(max: f64, comparer: ToleranceComparer) -> Result<Self, SearchError> {
        Self::new(0.0, max, false, true, comparer)
    }

    /// The closed degenerate interval `[length, length]`, matching one
    /// exact distance within tolerance.
    pub fn exact(length: f64, comparer: ToleranceComparer) -> Result<Self, SearchError> {
        Self::new(length, length, true, true, comparer)
    }

    /// The upper bound of the interval.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The lower bound of the interval.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The comparer used for bound checks.
    pub fn comparer(&self) -> &ToleranceComparer {
        &self.comparer
    }

    /// Whether a distance lies in the interval.
    pub fn contains(&self, distance: f64) -> bool {
        let lower = match self.comparer.compare(distance, self.min) {
            Ordering::Less => false,
            Ordering::Equal => self.min_inclusive,
            Ordering::Greater => true,
        };
        let upper = match self.comparer.compare(distance, self.max) {
            Ordering::Less => true,
            Ordering::Equal => self.max_inclusive,
            Ordering::Greater => false,
        };
        lower && upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn comparer() -> ToleranceComparer {
        ToleranceComparer::new(1.0e-6).unwrap()
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(matches!(
            RadialConstraint::new(2.0, 1.0, true, true, comparer()),
            Err(SearchError::InvertedConstraint { .. })
        ));
        assert!(matches!(
            RadialConstraint::new(0.0, f64::INFINITY, true, true, comparer()),
            Err(SearchError::NonFiniteConstraint { .. })
        ));
    }

    #[test]
    fn up_to_excludes_origin_and_includes_bound() {
        let constraint = RadialConstraint::up_to(3.0, comparer()).unwrap();
        assert!(!constraint.contains(0.0));
        assert!(!constraint.contains(1.0e-9));
        assert!(constraint.contains(1.5));
        assert!(constraint.contains(3.0));
        assert!(constraint.contains(3.0 + 1.0e-8));
        assert!(!constraint.contains(3.001));
    }

    #[test]
    fn exact_matches_only_its_length() {
        let constraint = RadialConstraint::exact(2.5, comparer()).unwrap();
        assert!(constraint.contains(2.5));
        assert!(constraint.contains(2.5 - 1.0e-8));
        assert!(!constraint.contains(2.49));
        assert!(!constraint.contains(2.51));
    }

    proptest! {
        #[test]
        fn contains_agrees_with_plain_interval_away_from_bounds(
            max in 0.5..10.0_f64,
            distance in 0.0..12.0_f64,
        ) {
            let constraint = RadialConstraint::up_to(max, comparer()).unwrap();
            // Outside the tolerance band around either bound, containment
            // must match the plain interval (0, max].
            prop_assume!((distance - max).abs() > 1.0e-5 && distance > 1.0e-5);
            prop_assert_eq!(constraint.contains(distance), distance < max);
        }
    }
}
