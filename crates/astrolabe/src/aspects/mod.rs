pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, classify, AspectCalculator, DEFAULT_ORB};
pub use types::{AspectInfo, AspectKind, AspectMatch};
