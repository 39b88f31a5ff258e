//! Two-tier hierarchy resolver: object storage first, database fallback.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use portal_core::result::AppResult;
use portal_core::traits::store::ObjectStore;
use portal_entity::hierarchy::item::Item;
use portal_entity::hierarchy::path::{is_year_segment, NavPath};

use super::format::{display_segment, month_display, title_case};
use super::index::HierarchyIndex;
use super::names::ClientNames;

/// One element of a breadcrumb trail.
#[derive(Debug, Clone, Serialize)]
pub struct Breadcrumb {
    /// The raw path segment.
    pub segment: String,
    /// Human-readable label for the segment.
    pub display_name: String,
    /// Cumulative path up to and including this segment.
    pub path: String,
}

/// Resolves a navigation path into a list of displayable items.
///
/// Every depth asks object storage for a physical listing first. When the
/// listing is empty at depths 1–3, the `documents` table is parsed instead
/// and virtual folders are synthesized. Depths past the category level
/// never fall back; files are leaves and nothing below them needs
/// synthesis.
#[derive(Debug, Clone)]
pub struct HierarchyResolver {
    store: Arc<dyn ObjectStore>,
    index: Arc<dyn HierarchyIndex>,
    names: Arc<ClientNames>,
}

impl HierarchyResolver {
    /// Create a resolver over the given storage backend and index.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        index: Arc<dyn HierarchyIndex>,
        names: Arc<ClientNames>,
    ) -> Self {
        Self { store, index, names }
    }

    /// The shared client-name cache.
    pub fn names(&self) -> &Arc<ClientNames> {
        &self.names
    }

    /// Resolve a path into its items.
    pub async fn resolve(&self, path: &NavPath) -> AppResult<Vec<Item>> {
        if path.is_root() {
            return self.resolve_root().await;
        }

        match self.resolve_from_storage(path).await? {
            Some(items) => Ok(items),
            // Past the category depth there is nothing to synthesize.
            None if path.depth() > 3 => Ok(Vec::new()),
            None => self.resolve_from_database(path).await,
        }
    }

    /// Breadcrumb trail for a path, warming the name cache for the
    /// client segment so labels render from a single pass.
    pub async fn breadcrumbs(&self, path: &NavPath) -> AppResult<Vec<Breadcrumb>> {
        self.ensure_client_name(path).await?;

        let mut crumbs = Vec::with_capacity(path.depth());
        let mut prefix = String::new();
        for (depth, segment) in path.segments().iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            crumbs.push(Breadcrumb {
                segment: segment.clone(),
                display_name: display_segment(segment, depth, &self.names),
                path: prefix.clone(),
            });
        }
        Ok(crumbs)
    }

    /// Make sure the path's client segment has a cached display name.
    pub async fn ensure_client_name(&self, path: &NavPath) -> AppResult<()> {
        if let Some(id) = path.client_segment().and_then(|s| Uuid::parse_str(s).ok()) {
            self.names.ensure(self.index.as_ref(), id).await?;
        }
        Ok(())
    }

    /// Root listing: the intersection of client records and top-level
    /// storage folders. A client whose folder was never created has no
    /// uploads and is not a navigable target.
    async fn resolve_root(&self) -> AppResult<Vec<Item>> {
        let clients = self.index.list_clients().await?;
        self.names.warm(&clients);

        let listing = self.store.list("").await?;
        let folders: HashSet<&str> = listing
            .iter()
            .filter(|entry| entry.is_folder())
            .map(|entry| entry.name.as_str())
            .collect();

        let items = clients
            .iter()
            .filter(|client| folders.contains(client.id.to_string().as_str()))
            .map(|client| {
                let id = client.id.to_string();
                Item::virtual_folder(id.clone(), id, client.display_name())
            })
            .collect();
        Ok(items)
    }

    /// Storage tier: `Some(items)` when the physical listing is non-empty,
    /// `None` when the path has no physical folder.
    async fn resolve_from_storage(&self, path: &NavPath) -> AppResult<Option<Vec<Item>>> {
        let listing = self.store.list(&path.join()).await?;
        if listing.is_empty() {
            return Ok(None);
        }

        let depth = path.depth();
        let mut folders = Vec::new();
        let mut files = Vec::new();
        for entry in &listing {
            let item = Item::from_listing(entry);
            if item.is_folder() {
                let item = match depth {
                    2 => {
                        let display = month_display(&item.name);
                        item.with_display_name(display)
                    }
                    3 => {
                        let display = title_case(&item.name);
                        item.with_display_name(display)
                    }
                    _ => item,
                };
                folders.push(item);
            } else {
                files.push(item);
            }
        }

        folders.extend(files);
        Ok(Some(folders))
    }

    /// Database tier: synthesize virtual folders from `documents` rows.
    async fn resolve_from_database(&self, path: &NavPath) -> AppResult<Vec<Item>> {
        let Some(client_id) = path.client_segment().and_then(|s| Uuid::parse_str(s).ok()) else {
            // A non-client first segment cannot match any documents row.
            debug!(path = %path, "No client id in path, nothing to synthesize");
            return Ok(Vec::new());
        };

        let items = match path.depth() {
            1 => {
                let documents = self.index.documents_for_client(client_id).await?;
                let years: BTreeSet<String> = documents
                    .iter()
                    .filter_map(|doc| doc.path_segment(1))
                    .filter(|segment| is_year_segment(segment))
                    .map(str::to_string)
                    .collect();
                years
                    .into_iter()
                    .map(|year| Item::virtual_folder(format!("year-{year}"), year.clone(), year))
                    .collect()
            }
            2 => {
                let year = path.segment(1).unwrap_or_default();
                let documents = self.index.documents_for_client(client_id).await?;
                let months: BTreeSet<String> = documents
                    .iter()
                    .filter(|doc| doc.path_segment(1) == Some(year))
                    .filter_map(|doc| doc.path_segment(2))
                    .map(str::to_string)
                    .collect();
                months
                    .into_iter()
                    .map(|month| {
                        let display = month_display(&month);
                        Item::virtual_folder(format!("month-{month}"), month, display)
                    })
                    .collect()
            }
            3 => {
                let prefix = format!("{}/", path.join());
                let documents = self
                    .index
                    .documents_with_prefix(client_id, &prefix)
                    .await?;
                let categories: BTreeSet<String> = documents
                    .iter()
                    .filter_map(|doc| {
                        doc.category
                            .as_deref()
                            .filter(|c| !c.is_empty())
                            .or_else(|| doc.path_segment(3))
                    })
                    .map(str::to_string)
                    .collect();
                categories
                    .into_iter()
                    .map(|category| {
                        let display = title_case(&category);
                        Item::virtual_folder(format!("category-{category}"), category, display)
                    })
                    .collect()
            }
            _ => Vec::new(),
        };
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use portal_entity::hierarchy::item::ItemKind;

    use super::super::testing::{folder_entry, file_entry, FakeIndex, FakeStore};
    use super::*;

    fn resolver(store: FakeStore, index: FakeIndex) -> HierarchyResolver {
        HierarchyResolver::new(
            Arc::new(store),
            Arc::new(index),
            Arc::new(ClientNames::default()),
        )
    }

    #[tokio::test]
    async fn test_root_intersects_clients_with_storage_folders() {
        let with_folder = Uuid::new_v4();
        let without_folder = Uuid::new_v4();

        let store = FakeStore::new();
        store.insert("", vec![folder_entry(&with_folder.to_string())]);

        let index = FakeIndex::default()
            .with_client(with_folder, Some("Acme"))
            .with_client(without_folder, Some("Orphan Ltd"));

        let items = resolver(store, index).resolve(&NavPath::root()).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, with_folder.to_string());
        assert_eq!(items[0].display_name, "Acme");
        assert_eq!(items[0].kind, ItemKind::Folder);
    }

    #[tokio::test]
    async fn test_storage_listing_wins_over_database() {
        let client = Uuid::new_v4();
        let store = FakeStore::new();
        store.insert(&client.to_string(), vec![folder_entry("2023")]);

        let index = FakeIndex::default()
            .with_document(client, &format!("{client}/2024/05/x.pdf"), None);
        let index_calls = index.calls.clone();

        let path = NavPath::new([client.to_string()]);
        let items = resolver(store, index).resolve(&path).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "2023");
        // A non-empty listing means the documents table is never consulted.
        assert_eq!(index_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_depth_1_fallback_synthesizes_years() {
        let client = Uuid::new_v4();
        let index = FakeIndex::default()
            .with_document(client, &format!("{client}/2023/01/x.pdf"), None)
            .with_document(client, &format!("{client}/2024/05/y.pdf"), None)
            .with_document(client, &format!("{client}/misc/05/z.pdf"), None);

        let path = NavPath::new([client.to_string()]);
        let items = resolver(FakeStore::new(), index).resolve(&path).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "year-2023");
        assert_eq!(items[0].display_name, "2023");
        assert_eq!(items[1].id, "year-2024");
        assert_eq!(items[1].display_name, "2024");
    }

    #[tokio::test]
    async fn test_depth_1_resolution_is_idempotent() {
        let client = Uuid::new_v4();
        let index = FakeIndex::default()
            .with_document(client, &format!("{client}/2023/01/x.pdf"), None)
            .with_document(client, &format!("{client}/2024/05/y.pdf"), None);

        let resolver = resolver(FakeStore::new(), index);
        let path = NavPath::new([client.to_string()]);

        let first = resolver.resolve(&path).await.unwrap();
        let second = resolver.resolve(&path).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_depth_2_fallback_filters_by_year_and_names_months() {
        let client = Uuid::new_v4();
        let index = FakeIndex::default()
            .with_document(client, &format!("{client}/2023/01/x.pdf"), None)
            .with_document(client, &format!("{client}/2023/05/y.pdf"), None)
            .with_document(client, &format!("{client}/2024/09/z.pdf"), None);

        let path = NavPath::new([client.to_string(), "2023".to_string()]);
        let items = resolver(FakeStore::new(), index).resolve(&path).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "month-01");
        assert_eq!(items[0].display_name, "January");
        assert_eq!(items[1].id, "month-05");
        assert_eq!(items[1].display_name, "May");
    }

    #[tokio::test]
    async fn test_depth_2_listing_renames_month_folders() {
        let client = Uuid::new_v4();
        let store = FakeStore::new();
        store.insert(
            &format!("{client}/2023"),
            vec![folder_entry("01"), folder_entry("notes")],
        );

        let path = NavPath::new([client.to_string(), "2023".to_string()]);
        let items = resolver(store, FakeIndex::default()).resolve(&path).await.unwrap();

        assert_eq!(items[0].name, "01");
        assert_eq!(items[0].display_name, "January");
        assert_eq!(items[1].display_name, "notes");
    }

    #[tokio::test]
    async fn test_depth_3_listing_orders_folders_before_files() {
        let client = Uuid::new_v4();
        let store = FakeStore::new();
        store.insert(
            &format!("{client}/2023/01"),
            vec![
                file_entry("statement.pdf", "application/pdf"),
                folder_entry("bank_reports"),
            ],
        );

        let path = NavPath::new([client.to_string(), "2023".to_string(), "01".to_string()]);
        let items = resolver(store, FakeIndex::default()).resolve(&path).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].display_name, "Bank Reports");
        assert_eq!(items[0].kind, ItemKind::Folder);
        assert_eq!(items[1].name, "statement.pdf");
        assert_eq!(items[1].kind, ItemKind::File);
    }

    #[tokio::test]
    async fn test_depth_3_fallback_prefers_explicit_category() {
        let client = Uuid::new_v4();
        let index = FakeIndex::default()
            .with_document(
                client,
                &format!("{client}/2023/01/misc/a.pdf"),
                Some("tax_forms"),
            )
            .with_document(client, &format!("{client}/2023/01/invoices/b.pdf"), None)
            .with_document(client, &format!("{client}/2024/02/other/c.pdf"), None);

        let path = NavPath::new([client.to_string(), "2023".to_string(), "01".to_string()]);
        let items = resolver(FakeStore::new(), index).resolve(&path).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "category-invoices");
        assert_eq!(items[0].display_name, "Invoices");
        assert_eq!(items[1].id, "category-tax_forms");
        assert_eq!(items[1].display_name, "Tax Forms");
    }

    #[tokio::test]
    async fn test_depth_4_never_falls_back() {
        let client = Uuid::new_v4();
        let index = FakeIndex::default()
            .with_document(client, &format!("{client}/2023/01/invoices/a.pdf"), None);
        let index_calls = index.calls.clone();

        let path = NavPath::new([
            client.to_string(),
            "2023".to_string(),
            "01".to_string(),
            "invoices".to_string(),
        ]);
        let items = resolver(FakeStore::new(), index).resolve(&path).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(index_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_client_segment_yields_empty_fallback() {
        let path = NavPath::new(["not-a-uuid".to_string()]);
        let items = resolver(FakeStore::new(), FakeIndex::default())
            .resolve(&path)
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_aborts_resolution() {
        let store = FakeStore::new();
        store.fail.store(true, Ordering::SeqCst);

        let path = NavPath::new([Uuid::new_v4().to_string()]);
        let result = resolver(store, FakeIndex::default()).resolve(&path).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_breadcrumbs_warm_client_name_lazily() {
        let client = Uuid::new_v4();
        let index = FakeIndex::default().with_client(client, Some("Acme GmbH"));

        let resolver = resolver(FakeStore::new(), index);
        let path = NavPath::new([client.to_string(), "2023".to_string(), "03".to_string()]);
        let crumbs = resolver.breadcrumbs(&path).await.unwrap();

        assert_eq!(crumbs.len(), 3);
        assert_eq!(crumbs[0].display_name, "Acme GmbH");
        assert_eq!(crumbs[1].display_name, "2023");
        assert_eq!(crumbs[2].display_name, "March");
        assert_eq!(crumbs[2].path, format!("{client}/2023/03"));
    }
}
