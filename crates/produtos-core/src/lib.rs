//! Core abstractions for the produtos workload.
//!
//! This crate provides the fundamental types:
//! - `Product` - The stored record, plus `NewProduct` / `ProductPatch`
//! - `CreateProductBody` / `UpdateProductBody` - Typed request payloads
//! - `ApiError` - Error kinds mapped to HTTP status codes
//! - `ApiRequest` - Normalized request handed to the handler
//! - `Clock` - Time source for record timestamps

mod clock;
mod context;
mod error;
mod ids;
mod payload;
mod price;
mod product;

pub use clock::*;
pub use context::*;
pub use error::*;
pub use ids::*;
pub use payload::*;
pub use price::*;
pub use product::*;
