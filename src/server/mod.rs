//! Server module for building the HTTP server
//!
//! This module provides a `ServerBuilder` that wires a store, a credential
//! directory and a resource policy into a ready-to-serve router.

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
