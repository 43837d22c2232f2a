pub mod bspline_curve;

pub use bspline_curve::*;

#[cfg(test)]
mod tests;
