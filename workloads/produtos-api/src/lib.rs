//! Product CRUD workload.
//!
//! A JSON API over a key-value table of products:
//!
//! | Method  | Path              | Operation                 |
//! |---------|-------------------|---------------------------|
//! | POST    | `/produtos`       | create a product (201)    |
//! | GET     | `/produtos`       | list every product        |
//! | GET     | `/produtos/{id}`  | fetch one product         |
//! | PUT     | `/produtos/{id}`  | partial update            |
//! | DELETE  | `/produtos/{id}`  | remove (idempotent)       |
//! | OPTIONS | any               | CORS preflight            |
//!
//! `RequestHandler` holds the routing and operations and runs natively, so
//! the whole contract is testable against `MemoryBackend`. On wasm32 the
//! Spin component wires it to the Key-Value Store.

pub mod config;
pub mod handler;
pub mod response;
pub mod routes;

#[cfg(target_arch = "wasm32")]
mod component;

pub use config::{ConfigError, HandlerConfig};
pub use handler::{RequestHandler, WORKLOAD};
pub use response::{ApiResponse, CORS_HEADERS};
pub use routes::Route;
