extern crate nalgebra as na;

pub mod geo;
pub mod obs;
pub mod pixel;
pub mod prelude;
pub mod units;
pub mod window;
