//! Page view-models
//!
//! Rendering-agnostic state for the two main screens. Each page exposes
//! the data and gating decisions a front end needs; nothing here knows
//! about widgets or markup.

pub mod listing;
pub mod product_detail;

pub use listing::ListView;
pub use product_detail::ProductDetailPage;
