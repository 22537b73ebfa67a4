//! Network layer - authenticated HTTP client and the request-running actor
//!
//! The Network actor receives API commands and sends back typed results.

pub mod actor;
pub mod client;
#[cfg(test)]
pub(crate) mod testing;

pub use actor::NetworkActor;
pub use client::{ApiClient, ReqwestTransport, Transport};
