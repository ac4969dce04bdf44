#![forbid(unsafe_code)]

pub mod generator;
pub mod model;
pub mod normalize;
pub mod time;

pub use time::Clock;
