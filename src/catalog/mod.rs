//! Catalog: create, read, update and delete for the records the condition
//! evaluator reads (substances, kinds, attributes, modes).

mod errors;
mod records;

pub use errors::{CatalogError, CatalogResult};
pub use records::{Catalog, SubstancePatch};
