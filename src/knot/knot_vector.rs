use std::ops::Index;

use itertools::Itertools;
use nalgebra::RealField;

use crate::errors::{Error, Result};
use crate::knot::KnotStyle;

/// Knot vector representation
///
/// A non-decreasing sequence of parameter breakpoints defining where each
/// basis function is active.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnotVector<T>(Vec<T>);

impl<T: RealField + Copy> KnotVector<T> {
    pub fn new(knots: Vec<T>) -> Self {
        Self(knots)
    }

    /// Validated constructor for caller-supplied knots
    /// # Example
    /// ```
    /// use splinal::prelude::KnotVector;
    /// assert!(KnotVector::try_new(vec![0., 0., 1., 2., 2.]).is_ok());
    /// assert!(KnotVector::try_new(vec![0., 1., 0.5]).is_err());
    /// ```
    pub fn try_new(knots: Vec<T>) -> Result<Self> {
        if let Some(index) = knots.iter().tuple_windows().position(|(a, b)| b < a) {
            return Err(Error::UnsortedKnots { index: index + 1 });
        }
        Ok(Self(knots))
    }

    /// Generate a knot vector of length `control_count + degree + 1` for the
    /// given construction policy.
    /// # Example
    /// ```
    /// use splinal::prelude::{KnotStyle, KnotVector};
    /// let knots: KnotVector<f64> = KnotVector::generate(KnotStyle::Uniform, 4, 3).unwrap();
    /// assert_eq!(knots.to_vec(), vec![0., 1., 2., 3., 4., 5., 6., 7.]);
    ///
    /// let knots: KnotVector<f64> = KnotVector::generate(KnotStyle::OpenUniform, 4, 3).unwrap();
    /// assert_eq!(knots.to_vec(), vec![0., 0., 0., 0., 1., 2., 2., 2.]);
    /// ```
    pub fn generate(style: KnotStyle, control_count: usize, degree: usize) -> Result<Self> {
        if control_count == 0 {
            return Err(Error::EmptyControlPoints);
        }
        if control_count <= degree {
            return Err(Error::TooFewControlPoints {
                count: control_count,
                degree,
            });
        }

        let len = control_count + degree + 1;
        let knots = (0..len)
            .map(|i| style.knot_at(i, len, control_count, degree))
            .collect();
        Ok(Self(knots))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.0.clone()
    }

    pub fn first(&self) -> T {
        self.0[0]
    }

    pub fn last(&self) -> T {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<T> {
        self.0.iter()
    }

    /// Get the domain of the knot vector by degree,
    /// the parameter range between the first and last active knots
    pub fn domain(&self, degree: usize) -> (T, T) {
        (self.0[degree], self.0[self.0.len() - 1 - degree])
    }

    /// Blending weight of control point `index` at parameter `t` for the
    /// given degree, by the Cox-de Boor recursion.
    ///
    /// Terms with a zero denominator (repeated knots) are skipped.
    /// # Example
    /// ```
    /// use splinal::prelude::KnotVector;
    /// let knots = KnotVector::new(vec![0., 0., 0., 0., 1., 1., 1., 1.]);
    /// let sum: f64 = (0..4).map(|i| knots.weight(i, 3, 0.5)).sum();
    /// assert!((sum - 1.).abs() < 1e-10);
    /// ```
    pub fn weight(&self, index: usize, degree: usize, t: T) -> T {
        let current_knot = self.0[index];
        let next_knot = self.0[index + 1];

        if degree == 0 {
            // Half-open span, except that the final non-empty span closes at
            // the last knot so the upper end of the domain stays reachable.
            let inside = current_knot <= t && t < next_knot;
            let at_end = t == next_knot && next_knot == self.last() && current_knot < next_knot;
            return if inside || at_end { T::one() } else { T::zero() };
        }

        let mut weight = T::zero();

        let denominator = self.0[index + degree] - current_knot;
        if denominator != T::zero() {
            weight += (t - current_knot) / denominator * self.weight(index, degree - 1, t);
        }

        let denominator = self.0[index + degree + 1] - next_knot;
        if denominator != T::zero() {
            weight += (self.0[index + degree + 1] - t) / denominator
                * self.weight(index + 1, degree - 1, t);
        }

        weight
    }
}

impl<T> Index<usize> for KnotVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_rejects_bad_configurations() {
        assert_eq!(
            KnotVector::<f64>::generate(KnotStyle::Uniform, 0, 3),
            Err(Error::EmptyControlPoints)
        );
        assert_eq!(
            KnotVector::<f64>::generate(KnotStyle::OpenUniform, 3, 3),
            Err(Error::TooFewControlPoints {
                count: 3,
                degree: 3
            })
        );
    }

    #[test]
    fn try_new_reports_first_unsorted_index() {
        assert_eq!(
            KnotVector::try_new(vec![0., 1., 2., 1.5, 3.]),
            Err(Error::UnsortedKnots { index: 3 })
        );
    }

    #[test]
    fn domain_spans_active_knots() {
        let knots: KnotVector<f64> = KnotVector::generate(KnotStyle::Uniform, 5, 2).unwrap();
        assert_eq!(knots.domain(2), (2., 5.));
    }

    #[test]
    fn degree_zero_weight_is_an_indicator_function() {
        let knots = KnotVector::new(vec![0., 1., 2., 3.]);
        assert_eq!(knots.weight(1, 0, 0.5), 0.);
        assert_eq!(knots.weight(1, 0, 1.), 1.);
        assert_eq!(knots.weight(1, 0, 2.), 0.);
    }

    #[test]
    fn final_span_is_closed_at_the_last_knot() {
        // fully clamped vector: every weight vanishes at t = 1 under a
        // strictly half-open rule, the closed final span keeps the sum at 1
        let knots = KnotVector::new(vec![0., 0., 0., 0., 1., 1., 1., 1.]);
        let sum: f64 = (0..4).map(|i| knots.weight(i, 3, 1.)).sum();
        assert_eq!(sum, 1.);
        assert_eq!(knots.weight(3, 3, 1.), 1.);
    }
}
