#![forbid(unsafe_code)]

pub mod catalogue;
pub mod model;
pub mod puzzle;
pub mod scoring;
pub mod time;

pub use time::Clock;
