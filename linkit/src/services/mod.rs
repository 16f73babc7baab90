//! Domain services
//!
//! One function per backend procedure: parameter marshalling plus
//! identifier normalization, delegating entirely to the RPC gateway.
//! No business rules live here; the backend validates field content.

pub mod collections;
pub mod links;
pub mod notes;
pub mod products;
pub mod sources;
