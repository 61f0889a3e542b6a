//! Observability for the produtos workload.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with request context
//! - `LogBuilder` - Fluent construction of entries with typed fields
//! - `LogLevel` / `LogFormat` - Configurable threshold and output format

mod logging;

pub use logging::*;

// Re-export RequestId from produtos-core for convenience
pub use produtos_core::RequestId;
