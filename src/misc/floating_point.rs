use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Trait for floating point scalar types (f32, f64)
/// used as the field of every curve and surface in this crate
pub trait FloatingPoint: RealField + ToPrimitive + Copy {}

impl FloatingPoint for f32 {}
impl FloatingPoint for f64 {}
