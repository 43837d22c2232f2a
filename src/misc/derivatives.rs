use nalgebra::{Point3, Vector3};

use crate::misc::FloatingPoint;

/// Step size shared by every finite-difference stencil in this crate.
pub const FINITE_DIFFERENCE_STEP: f64 = 1e-2;

/// First and second derivative estimates of a parametric point function.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveDerivatives<T: FloatingPoint> {
    pub velocity: Vector3<T>,
    pub acceleration: Vector3<T>,
}

/// Estimate velocity and acceleration of `f` at `t` with a central
/// difference stencil.
///
/// Derivatives are never taken analytically from the basis functions;
/// position evaluation is cheap and smooth enough that the fixed-step
/// estimate carries only an ε-scale error.
pub fn central_derivatives<T, F>(f: F, t: T) -> CurveDerivatives<T>
where
    T: FloatingPoint,
    F: Fn(T) -> Point3<T>,
{
    let eps = T::from_f64(FINITE_DIFFERENCE_STEP).unwrap();
    let two = T::from_f64(2.0).unwrap();

    let current = f(t);
    let next = f(t + eps);
    let prev = f(t - eps);

    let velocity = (next.coords - prev.coords) / (two * eps);
    let acceleration = (next.coords - current.coords * two + prev.coords) / (eps * eps);

    CurveDerivatives {
        velocity,
        acceleration,
    }
}
