pub mod clock;
pub mod gain;
pub mod point;
