//! Link-it library
//!
//! Personal product bookmarking and comparison. The crate carries both
//! halves of the system: the RPC backend (database, server) and the
//! client layers built on it (gateway, services, store, pages).

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod pages;
pub mod rpc;
pub mod server;
pub mod services;
pub mod session;
pub mod store;
