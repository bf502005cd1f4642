pub mod env;
pub mod error;
pub mod result;
#[cfg(feature = "signal")]
pub mod signal;
pub mod tracer;
