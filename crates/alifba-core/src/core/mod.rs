pub mod easing;
pub mod timer;
