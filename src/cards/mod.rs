//! Card data: kinds, descriptors, and the catalog registry.

mod card;
mod catalog;

pub use card::{Card, CardKind};
pub use catalog::Catalog;
