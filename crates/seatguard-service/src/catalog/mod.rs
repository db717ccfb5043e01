//! Event catalog: cached listings and seat provisioning.

pub mod cache;
pub mod service;

pub use cache::CatalogCache;
pub use service::CatalogService;
