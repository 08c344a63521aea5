#![forbid(unsafe_code)]

pub mod assessment;
pub mod model;
pub mod recommend;
pub mod time;

pub use time::Clock;
