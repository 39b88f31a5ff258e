//! Value objects for the virtual document hierarchy.

pub mod item;
pub mod path;

pub use item::{Item, ItemKind};
pub use path::NavPath;
