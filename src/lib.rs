#![allow(clippy::needless_range_loop)]

mod curve;
mod errors;
mod knot;
mod misc;
mod surface;

pub mod prelude {
    pub use crate::curve::*;
    pub use crate::errors::*;
    pub use crate::knot::*;
    pub use crate::misc::*;
    pub use crate::surface::*;
}
