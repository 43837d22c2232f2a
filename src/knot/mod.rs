pub mod knot_style;
pub mod knot_vector;

pub use knot_style::*;
pub use knot_vector::*;
