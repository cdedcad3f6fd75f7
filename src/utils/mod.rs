pub mod coordinate;
pub mod math;
