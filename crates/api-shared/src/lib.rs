//! # API Shared
//!
//! Shared definitions for the labtrack REST API and its clients.
//!
//! Contains:
//! - JSON wire types (`models` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` on the server side and by `labtrack-ui` on the client side, so both ends
//! agree on field names and shapes.

pub mod health;
pub mod models;

pub use health::HealthService;
pub use models::*;
