//! Displayable items in the virtual hierarchy.

use serde::{Deserialize, Serialize};

use portal_core::traits::store::StorageObjectMeta;

/// Whether an item navigates further down or is a leaf document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A navigable folder (physical or synthesized).
    Folder,
    /// A downloadable file.
    File,
}

/// A node in the virtual hierarchy, ready for display.
///
/// Items derived from storage listings keep their entry name as `id`;
/// virtual folders synthesized from database rows get synthetic ids
/// (`year-<y>`, `month-<m>`, `category-<c>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier, unique within one listing.
    pub id: String,
    /// Raw storage/database key, used for navigation.
    pub name: String,
    /// Human-readable label.
    pub display_name: String,
    /// Folder or file.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Size in bytes (files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// MIME type (files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Item {
    /// A folder item whose display name equals its raw name.
    pub fn folder(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            display_name: name.clone(),
            name,
            kind: ItemKind::Folder,
            size_bytes: None,
            mime_type: None,
        }
    }

    /// A virtual folder synthesized from database rows.
    pub fn virtual_folder(
        id: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: display_name.into(),
            kind: ItemKind::Folder,
            size_bytes: None,
            mime_type: None,
        }
    }

    /// An item built from one storage listing entry. Folders are entries
    /// without MIME metadata.
    pub fn from_listing(meta: &StorageObjectMeta) -> Self {
        if meta.is_folder() {
            Self::folder(meta.name.clone())
        } else {
            Self {
                id: meta.name.clone(),
                name: meta.name.clone(),
                display_name: meta.name.clone(),
                kind: ItemKind::File,
                size_bytes: Some(meta.size_bytes),
                mime_type: meta.mime_type.clone(),
            }
        }
    }

    /// Replace the display name, keeping everything else.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Whether this item is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }
}
