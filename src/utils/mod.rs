//! Utility functions and types for the dashboard.

pub mod error;
mod logging;
#[cfg(test)]
pub(crate) use logging::init_test_logging;
pub mod types;

pub use error::Error;
pub use logging::init_logging;
pub use types::*;

/// Common result type for utility functions
pub type Result<T> = std::result::Result<T, Error>;
