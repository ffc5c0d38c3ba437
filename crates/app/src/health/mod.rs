//! Readiness

mod errors;
mod service;

pub use errors::*;
pub use service::*;
