pub mod distributions;
pub mod float;
pub mod transform;
pub mod vec;
