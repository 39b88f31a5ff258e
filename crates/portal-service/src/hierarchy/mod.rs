//! Virtual document hierarchy resolution.
//!
//! The portal presents documents as a four-level tree
//! (client, year, month, category) that has no single physical backing:
//! object storage holds the real folders, and the `documents` table fills
//! in levels that were never materialized on disk. The resolver composes
//! both sources, storage first.

pub mod format;
pub mod index;
pub mod names;
pub mod navigator;
pub mod resolver;
#[cfg(test)]
pub(crate) mod testing;

pub use index::{DatabaseIndex, HierarchyIndex};
pub use names::ClientNames;
pub use navigator::Navigator;
pub use resolver::{Breadcrumb, HierarchyResolver};
