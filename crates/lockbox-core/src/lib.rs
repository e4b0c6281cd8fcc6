pub mod error;
pub mod reshape;
pub mod types;

pub use error::ProxyError;
pub use reshape::{reshape, reshape_checked};
pub use types::{BatchQuery, Method, NormalizedResult, RawRow, ReadinessState, Statement, Value};

#[cfg(test)]
mod tests;
