//! Business logic: hierarchy resolution, client management and uploads.

pub mod client;
pub mod document;
pub mod hierarchy;

pub use hierarchy::names::ClientNames;
pub use hierarchy::navigator::Navigator;
pub use hierarchy::resolver::HierarchyResolver;
