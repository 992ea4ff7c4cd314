pub mod catalog;

pub use catalog::{CardCatalog, CardId, CatalogError, MAX_UNIQUE_CARDS};
