pub mod derivatives;
pub mod floating_point;
pub mod frenet_frame;

pub use derivatives::*;
pub use floating_point::*;
pub use frenet_frame::*;
