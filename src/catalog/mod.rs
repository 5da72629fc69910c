pub mod provider;
pub mod seed;

pub use provider::CatalogProvider;
