//! Application state layer
//!
//! `AppStore` mirrors the signed-in user's products and collections in
//! memory and coordinates every mutation against an `EntityRepository`.
//! Two repository implementations exist: on-device SQLite for the
//! unauthenticated mode and the remote RPC backend for authenticated
//! sessions. The mode is chosen once, when the store is constructed.

pub mod backend;
pub mod entities;
pub mod local;
pub mod remote;
#[allow(clippy::module_inception)]
pub(crate) mod store;

pub use backend::EntityRepository;
pub use entities::{Collection, CollectionDraft, Product, ProductDraft};
pub use local::LocalRepository;
pub use remote::RemoteRepository;
pub use store::{AppStore, LoadState};
