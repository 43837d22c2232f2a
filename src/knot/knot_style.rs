use nalgebra::RealField;

/// Knot vector construction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnotStyle {
    /// Arithmetic progression (Ex: `[0, 1, 2, 3, ...]`)
    Uniform,
    /// Repeats the first knot `degree + 1` times and clamps the tail to a
    /// constant plateau, so the curve starts at the first control point
    /// (Ex: `[0, 0, 0, 0, 1, 2, 2, 2]` for 4 control points of degree 3)
    OpenUniform,
}

impl KnotStyle {
    /// The knot value at `index` of a vector of `len` knots spanning
    /// `control_count` control points of the given degree.
    pub(crate) fn knot_at<T: RealField + Copy>(
        &self,
        index: usize,
        len: usize,
        control_count: usize,
        degree: usize,
    ) -> T {
        match self {
            KnotStyle::Uniform => T::from_usize(index).unwrap(),
            KnotStyle::OpenUniform => {
                if index <= degree {
                    // repeat the first knot
                    T::zero()
                } else if index <= len - degree - 1 {
                    T::from_usize(index - degree).unwrap()
                } else {
                    // repeat the last knot, `n - (degree + 1) + 2`
                    T::from_usize(control_count + 1 - degree).unwrap()
                }
            }
        }
    }
}
