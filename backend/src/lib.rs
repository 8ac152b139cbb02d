//! Barcode backend library.
//!
//! The crate follows a hexagonal layout: `domain` holds the business rules
//! and port traits, `inbound` adapts HTTP requests onto the domain,
//! `outbound` implements the ports against PostgreSQL and the barcode
//! encoder, and `server` wires the pieces into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::SessionGate;
