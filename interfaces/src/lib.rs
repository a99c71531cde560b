pub mod defs;
pub mod categories;

pub use categories::StaticCategories;
pub use defs::{Article, CategorySpec, KnownCategories};
