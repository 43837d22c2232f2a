use nalgebra::Point3;

use crate::errors::{Error, Result};
use crate::knot::{KnotStyle, KnotVector};
use crate::misc::{central_derivatives, FloatingPoint, FrenetFrame};

/// Lower bound of the curve sample density.
const MIN_PRECISION: usize = 64;
/// Upper bound of the curve sample density.
const MAX_PRECISION: usize = 1024;
const DEFAULT_PRECISION: usize = 256;

/// B-Spline curve over 3D control points
/// By generics, it can be used with f32 or f64 scalar types
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BSplineCurve<T: FloatingPoint> {
    control_points: Vec<Point3<T>>,
    degree: usize,
    style: KnotStyle,
    /// knot vector for the curve
    /// the length of the knot vector is equal to the `# of control points + degree + 1`
    knots: KnotVector<T>,
    precision: usize,
}

impl<T: FloatingPoint> BSplineCurve<T> {
    /// Create a new B-Spline curve
    /// # Failures
    /// - if the control point set is empty
    /// - if the number of control points does not exceed the degree
    ///
    /// # Example
    /// ```
    /// use nalgebra::Point3;
    /// use splinal::prelude::{BSplineCurve, KnotStyle};
    ///
    /// let control_points: Vec<Point3<f64>> = vec![
    ///     Point3::new(-2., 0., 0.),
    ///     Point3::new(-2., 2., 0.),
    ///     Point3::new(2., -2., 0.),
    ///     Point3::new(2., 0., 0.),
    /// ];
    /// let curve = BSplineCurve::try_new(3, control_points, KnotStyle::OpenUniform);
    /// assert!(curve.is_ok());
    /// ```
    pub fn try_new(
        degree: usize,
        control_points: Vec<Point3<T>>,
        style: KnotStyle,
    ) -> Result<Self> {
        let knots = KnotVector::generate(style, control_points.len(), degree)?;
        Ok(Self {
            control_points,
            degree,
            style,
            knots,
            precision: DEFAULT_PRECISION,
        })
    }

    /// Sample the whole curve as `precision * # of control points` points
    /// over the knot domain.
    ///
    /// Returns a freshly built point sequence; the curve itself caches
    /// nothing, so repeated calls with unchanged state produce identical
    /// output.
    pub fn evaluate(&self) -> Vec<Point3<T>> {
        let control_count = self.control_points.len();
        let samples = self.precision * control_count;
        let start = self.knots[self.degree];
        let delta = self.knots[control_count] - start;
        let samples_t = T::from_usize(samples).unwrap();

        let mut points = vec![Point3::origin(); samples];
        for (i, point) in points.iter_mut().enumerate() {
            let t = start + T::from_usize(i).unwrap() * delta / samples_t;
            for (j, control_point) in self.control_points.iter().enumerate() {
                let weight = self.knots.weight(j, self.degree, t);
                point.coords += control_point.coords * weight;
            }
        }
        points
    }

    /// Evaluate the curve at a given parameter by summing the weighted
    /// control points.
    pub fn point_at(&self, t: T) -> Point3<T> {
        let mut point = Point3::origin();
        for (i, control_point) in self.control_points.iter().enumerate() {
            let weight = self.knots.weight(i, self.degree, t);
            point.coords += control_point.coords * weight;
        }
        point
    }

    /// Evaluate the Frenet frame at a given parameter.
    ///
    /// The frame is estimated with finite differences; degenerate geometry
    /// (zero velocity, acceleration parallel to velocity) yields NaN
    /// components in the normal and binormal.
    pub fn frenet_frame_at(&self, t: T) -> FrenetFrame<T> {
        let derivatives = central_derivatives(|t| self.point_at(t), t);
        FrenetFrame::from_derivatives(self.point_at(t), &derivatives)
    }

    /// Compute the curvature at a given parameter, `|v × a| / |v|³`.
    pub fn curvature_at(&self, t: T) -> T {
        let derivatives = central_derivatives(|t| self.point_at(t), t);
        derivatives.velocity.cross(&derivatives.acceleration).norm()
            / derivatives.velocity.norm().powi(3)
    }

    /// Replace the control points and regenerate the knot vector under the
    /// current style and degree.
    pub fn set_control_points(&mut self, control_points: Vec<Point3<T>>) -> Result<()> {
        self.knots = KnotVector::generate(self.style, control_points.len(), self.degree)?;
        self.control_points = control_points;
        Ok(())
    }

    pub fn control_points(&self) -> &[Point3<T>] {
        &self.control_points
    }

    pub fn control_points_count(&self) -> usize {
        self.control_points.len()
    }

    /// Update the degree. The knot vector is left untouched; call
    /// [`Self::init_knot_vector`] to rebuild it before evaluating again.
    pub fn set_degree(&mut self, degree: usize) {
        self.degree = degree;
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The order of the curve (degree + 1), the number of control points
    /// that influence each segment.
    pub fn order(&self) -> usize {
        self.degree + 1
    }

    /// Rebuild the knot vector from the current style, degree and control
    /// point count.
    pub fn init_knot_vector(&mut self) -> Result<()> {
        self.knots = KnotVector::generate(self.style, self.control_points.len(), self.degree)?;
        Ok(())
    }

    /// Replace the knot vector with caller-supplied knots.
    /// # Failures
    /// - if the length differs from `# of control points + degree + 1`
    /// - if the sequence is not non-decreasing
    pub fn set_knot_vector(&mut self, knots: Vec<T>) -> Result<()> {
        let expected = self.control_points.len() + self.degree + 1;
        if knots.len() != expected {
            return Err(Error::KnotCountMismatch {
                expected,
                actual: knots.len(),
            });
        }
        self.knots = KnotVector::try_new(knots)?;
        Ok(())
    }

    pub fn knots(&self) -> &KnotVector<T> {
        &self.knots
    }

    pub fn knot_style(&self) -> KnotStyle {
        self.style
    }

    /// Get the parameter domain of the curve, `[knot[degree], knot[len - degree - 1]]`
    pub fn knots_domain(&self) -> (T, T) {
        self.knots.domain(self.degree)
    }

    /// The number of polynomial segments covered by the knot span.
    pub fn segments_count(&self) -> usize {
        self.control_points.len() + 1 - self.order()
    }

    /// Set the sample density, clamped to `[64, 1024]`.
    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision.clamp(MIN_PRECISION, MAX_PRECISION);
    }

    pub fn precision(&self) -> usize {
        self.precision
    }
}
