//! Marketplace backend library.
//!
//! Hexagonal layout: `domain` holds the entities, ports, and services;
//! `inbound` exposes the HTTP surface; `outbound` provides the PostgreSQL
//! and authentication adapters that implement the driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by documentation tooling.
pub use doc::ApiDoc;
