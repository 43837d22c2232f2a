use nalgebra::Point3;

use crate::errors::{Error, Result};
use crate::knot::{KnotStyle, KnotVector};
use crate::misc::{
    central_derivatives, FloatingPoint, FrenetFrame, FINITE_DIFFERENCE_STEP,
};

const DEFAULT_PRECISION: usize = 6;

/// Per-direction degrees of a B-Spline surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceAttributes {
    pub u_degree: usize,
    pub v_degree: usize,
}

impl SurfaceAttributes {
    pub fn new(u_degree: usize, v_degree: usize) -> Self {
        Self { u_degree, v_degree }
    }
}

/// Frenet frames of a surface at a parameter pair, one per direction.
#[derive(Debug, Clone)]
pub struct SurfaceFrenetFrame<T: FloatingPoint> {
    u: FrenetFrame<T>,
    v: FrenetFrame<T>,
}

impl<T: FloatingPoint> SurfaceFrenetFrame<T> {
    pub fn new(u: FrenetFrame<T>, v: FrenetFrame<T>) -> Self {
        Self { u, v }
    }

    pub fn u(&self) -> &FrenetFrame<T> {
        &self.u
    }

    pub fn v(&self) -> &FrenetFrame<T> {
        &self.v
    }
}

/// Curvature scalars of a surface at a parameter pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCurvatures<T: FloatingPoint> {
    pub gaussian: T,
    pub mean: T,
    pub absolute: T,
}

/// Tensor-product B-Spline surface over a 2D grid of 3D control points,
/// with two independent degrees and knot vectors
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BSplineSurface<T: FloatingPoint> {
    /// control points laid out as `[u][v]`
    control_points: Vec<Vec<Point3<T>>>,
    u_degree: usize,
    v_degree: usize,
    style: KnotStyle,
    u_knots: KnotVector<T>,
    v_knots: KnotVector<T>,
    precision: usize,
}

impl<T: FloatingPoint> BSplineSurface<T> {
    /// Create a new B-Spline surface
    /// # Failures
    /// - if the control grid is empty
    /// - if the grid rows have unequal lengths
    /// - if either direction has no more control points than its degree
    ///
    /// # Example
    /// ```
    /// use nalgebra::Point3;
    /// use splinal::prelude::{BSplineSurface, KnotStyle, SurfaceAttributes};
    ///
    /// let grid: Vec<Vec<Point3<f64>>> = (0..4)
    ///     .map(|i| (0..4).map(|j| Point3::new(i as f64, j as f64, 0.)).collect())
    ///     .collect();
    /// let surface = BSplineSurface::try_new(SurfaceAttributes::new(3, 3), grid, KnotStyle::OpenUniform);
    /// assert!(surface.is_ok());
    /// ```
    pub fn try_new(
        attributes: SurfaceAttributes,
        control_points: Vec<Vec<Point3<T>>>,
        style: KnotStyle,
    ) -> Result<Self> {
        let u_count = control_points.len();
        if u_count == 0 || control_points[0].is_empty() {
            return Err(Error::EmptyControlPoints);
        }
        let v_count = control_points[0].len();
        if control_points.iter().any(|row| row.len() != v_count) {
            return Err(Error::RaggedControlGrid);
        }

        let u_knots = KnotVector::generate(style, u_count, attributes.u_degree)?;
        let v_knots = KnotVector::generate(style, v_count, attributes.v_degree)?;

        Ok(Self {
            control_points,
            u_degree: attributes.u_degree,
            v_degree: attributes.v_degree,
            style,
            u_knots,
            v_knots,
            precision: DEFAULT_PRECISION,
        })
    }

    /// Sample the whole surface as a `precision * # of u control points` by
    /// `precision * # of v control points` grid over both knot domains.
    ///
    /// Cost is O(samples_u · samples_v · grid_u · grid_v); this is the
    /// dominant cost center of the crate.
    pub fn evaluate(&self) -> Vec<Vec<Point3<T>>> {
        let u_count = self.control_points.len();
        let v_count = self.control_points[0].len();
        let u_samples = self.precision * u_count;
        let v_samples = self.precision * v_count;

        let u_start = self.u_knots[self.u_degree];
        let v_start = self.v_knots[self.v_degree];
        let u_delta = self.u_knots[u_count] - u_start;
        let v_delta = self.v_knots[v_count] - v_start;
        let u_samples_t = T::from_usize(u_samples).unwrap();
        let v_samples_t = T::from_usize(v_samples).unwrap();

        let mut grid = vec![vec![Point3::origin(); v_samples]; u_samples];
        for (iu, row) in grid.iter_mut().enumerate() {
            let u = u_start + T::from_usize(iu).unwrap() * u_delta / u_samples_t;
            let u_weights: Vec<T> = (0..u_count)
                .map(|i| self.u_knots.weight(i, self.u_degree, u))
                .collect();

            for (iv, point) in row.iter_mut().enumerate() {
                let v = v_start + T::from_usize(iv).unwrap() * v_delta / v_samples_t;
                for i in 0..u_count {
                    for j in 0..v_count {
                        let weight = u_weights[i] * self.v_knots.weight(j, self.v_degree, v);
                        point.coords += self.control_points[i][j].coords * weight;
                    }
                }
            }
        }
        grid
    }

    /// Evaluate the surface at a given parameter pair by summing the
    /// weighted control grid.
    pub fn point_at(&self, u: T, v: T) -> Point3<T> {
        let mut point = Point3::origin();
        for (i, row) in self.control_points.iter().enumerate() {
            let u_weight = self.u_knots.weight(i, self.u_degree, u);
            for (j, control_point) in row.iter().enumerate() {
                let weight = u_weight * self.v_knots.weight(j, self.v_degree, v);
                point.coords += control_point.coords * weight;
            }
        }
        point
    }

    /// Evaluate the Frenet frame at a given parameter pair, one frame per
    /// parametric direction.
    ///
    /// Estimated with the same finite-difference stencil as the curve case;
    /// degenerate directions yield NaN normal/binormal components.
    pub fn frenet_frame_at(&self, u: T, v: T) -> SurfaceFrenetFrame<T> {
        let position = self.point_at(u, v);
        let u_derivatives = central_derivatives(|t| self.point_at(t, v), u);
        let v_derivatives = central_derivatives(|t| self.point_at(u, t), v);

        SurfaceFrenetFrame::new(
            FrenetFrame::from_derivatives(position, &u_derivatives),
            FrenetFrame::from_derivatives(position, &v_derivatives),
        )
    }

    /// Compute the Gaussian, mean and absolute curvature at a parameter pair
    /// from the first (E, F, G) and second (L, M, N) fundamental forms,
    /// all estimated by finite differences.
    ///
    /// Singular parametrizations (`E·G − F² ≈ 0`, or a vanishing surface
    /// normal) produce NaN/Inf rather than an error.
    pub fn curvatures_at(&self, u: T, v: T) -> SurfaceCurvatures<T> {
        let two = T::from_f64(2.0).unwrap();
        let four = T::from_f64(4.0).unwrap();
        let eps = T::from_f64(FINITE_DIFFERENCE_STEP).unwrap();

        let u_derivatives = central_derivatives(|t| self.point_at(t, v), u);
        let v_derivatives = central_derivatives(|t| self.point_at(u, t), v);
        let s_u = u_derivatives.velocity;
        let s_v = v_derivatives.velocity;
        let s_uu = u_derivatives.acceleration;
        let s_vv = v_derivatives.acceleration;

        // mixed second derivative from a central cross stencil
        let s_uv = (self.point_at(u + eps, v + eps).coords
            - self.point_at(u + eps, v - eps).coords
            - self.point_at(u - eps, v + eps).coords
            + self.point_at(u - eps, v - eps).coords)
            / (four * eps * eps);

        let normal = s_u.cross(&s_v).normalize();

        let e = s_u.dot(&s_u);
        let f = s_u.dot(&s_v);
        let g = s_v.dot(&s_v);
        let l = s_uu.dot(&normal);
        let m = s_uv.dot(&normal);
        let n = s_vv.dot(&normal);

        let denominator = e * g - f * f;
        let gaussian = (l * n - m * m) / denominator;
        let mean = (e * n + g * l - two * f * m) / (two * denominator);
        let absolute = four * mean * mean - two * gaussian;

        SurfaceCurvatures {
            gaussian,
            mean,
            absolute,
        }
    }

    /// Compute a Gaussian curvature grid matching the resolution of
    /// [`Self::evaluate`], for color-coded curvature visualization.
    ///
    /// Each cell performs several surface evaluations, so this is far more
    /// expensive than point sampling; callers decide when they need it.
    pub fn evaluate_curvatures(&self) -> Vec<Vec<T>> {
        let u_count = self.control_points.len();
        let v_count = self.control_points[0].len();
        let u_samples = self.precision * u_count;
        let v_samples = self.precision * v_count;

        let u_start = self.u_knots[self.u_degree];
        let v_start = self.v_knots[self.v_degree];
        let u_delta = self.u_knots[u_count] - u_start;
        let v_delta = self.v_knots[v_count] - v_start;
        let u_samples_t = T::from_usize(u_samples).unwrap();
        let v_samples_t = T::from_usize(v_samples).unwrap();

        let mut curvatures = vec![vec![T::zero(); v_samples]; u_samples];
        for (iu, row) in curvatures.iter_mut().enumerate() {
            let u = u_start + T::from_usize(iu).unwrap() * u_delta / u_samples_t;
            for (iv, value) in row.iter_mut().enumerate() {
                let v = v_start + T::from_usize(iv).unwrap() * v_delta / v_samples_t;
                *value = self.curvatures_at(u, v).gaussian;
            }
        }
        curvatures
    }

    /// Replace the control grid and regenerate both knot vectors under the
    /// current style and degrees.
    pub fn set_control_points(&mut self, control_points: Vec<Vec<Point3<T>>>) -> Result<()> {
        let u_count = control_points.len();
        if u_count == 0 || control_points[0].is_empty() {
            return Err(Error::EmptyControlPoints);
        }
        let v_count = control_points[0].len();
        if control_points.iter().any(|row| row.len() != v_count) {
            return Err(Error::RaggedControlGrid);
        }

        self.u_knots = KnotVector::generate(self.style, u_count, self.u_degree)?;
        self.v_knots = KnotVector::generate(self.style, v_count, self.v_degree)?;
        self.control_points = control_points;
        Ok(())
    }

    pub fn control_points(&self) -> &[Vec<Point3<T>>] {
        &self.control_points
    }

    pub fn attributes(&self) -> SurfaceAttributes {
        SurfaceAttributes::new(self.u_degree, self.v_degree)
    }

    /// Update the degrees. The knot vectors are left untouched; call
    /// [`Self::init_knot_vectors`] to rebuild them before evaluating again.
    pub fn set_attributes(&mut self, attributes: SurfaceAttributes) {
        self.u_degree = attributes.u_degree;
        self.v_degree = attributes.v_degree;
    }

    pub fn u_degree(&self) -> usize {
        self.u_degree
    }

    pub fn v_degree(&self) -> usize {
        self.v_degree
    }

    /// Rebuild both knot vectors from the current style, degrees and control
    /// grid dimensions.
    pub fn init_knot_vectors(&mut self) -> Result<()> {
        self.u_knots =
            KnotVector::generate(self.style, self.control_points.len(), self.u_degree)?;
        self.v_knots =
            KnotVector::generate(self.style, self.control_points[0].len(), self.v_degree)?;
        Ok(())
    }

    /// Replace both knot vectors with caller-supplied knots, validated
    /// against the grid dimensions and degrees.
    pub fn set_knot_vectors(&mut self, u_knots: Vec<T>, v_knots: Vec<T>) -> Result<()> {
        let u_expected = self.control_points.len() + self.u_degree + 1;
        if u_knots.len() != u_expected {
            return Err(Error::KnotCountMismatch {
                expected: u_expected,
                actual: u_knots.len(),
            });
        }
        let v_expected = self.control_points[0].len() + self.v_degree + 1;
        if v_knots.len() != v_expected {
            return Err(Error::KnotCountMismatch {
                expected: v_expected,
                actual: v_knots.len(),
            });
        }

        self.u_knots = KnotVector::try_new(u_knots)?;
        self.v_knots = KnotVector::try_new(v_knots)?;
        Ok(())
    }

    pub fn u_knots(&self) -> &KnotVector<T> {
        &self.u_knots
    }

    pub fn v_knots(&self) -> &KnotVector<T> {
        &self.v_knots
    }

    /// Get the u parameter domain of the surface
    pub fn u_knots_domain(&self) -> (T, T) {
        self.u_knots.domain(self.u_degree)
    }

    /// Get the v parameter domain of the surface
    pub fn v_knots_domain(&self) -> (T, T) {
        self.v_knots.domain(self.v_degree)
    }

    /// Set the sample density. Unlike the curve, the surface precision is
    /// not clamped; large values make [`Self::evaluate`] quartically more
    /// expensive.
    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision;
    }

    pub fn precision(&self) -> usize {
        self.precision
    }
}
