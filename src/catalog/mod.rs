//! In-memory catalog: entity store, association index, query engine and the
//! facade handlers call into.

mod associations;
mod entity_store;
mod kind;
mod model;
mod query;

pub use associations::{AssociationIndex, EntityRef};
pub use entity_store::EntityStore;
pub use kind::Kind;
pub use model::{Address, Artist, Company, Item, Position, Profile, Record, Shop};
pub use query::{QueryEngine, SortField, DEFAULT_PER_PAGE};

use crate::error::CatalogError;
use serde::Serialize;
use std::collections::BTreeMap;

/// One page of a listing plus the total number of pages.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<'a> {
    /// `None` when the requested page is past the end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Vec<&'a Record>>,
    /// Page count, not record count.
    pub collection_size: usize,
}

/// Read facade over a fully seeded [`EntityStore`].
#[derive(Debug)]
pub struct Catalog {
    store: EntityStore,
    per_page: usize,
}

impl Catalog {
    pub fn new(store: EntityStore, per_page: usize) -> Self {
        Self {
            store,
            per_page: per_page.max(1),
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn query(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.store, self.per_page)
    }

    /// Page `page` (0-based) of `kind`, optionally sorted by the field named `sort`.
    pub fn list_page(
        &self,
        kind: Kind,
        page: usize,
        sort: Option<&str>,
        reversed: bool,
    ) -> Result<Listing<'_>, CatalogError> {
        let sort = match sort.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => Some(name.parse::<SortField>()?),
            None => None,
        };
        let pages = self.query().paginate(kind, sort, reversed);
        let collection_size = pages.len();
        Ok(Listing {
            collection: pages.into_iter().nth(page),
            collection_size,
        })
    }

    pub fn get_one(&self, kind: Kind, id: &str) -> Option<&Record> {
        self.query().get_model(kind, id)
    }

    /// Records for a comma-separated id list such as `"3,1,3"`.
    pub fn get_batch(&self, kind: Kind, ids: &str) -> Vec<&Record> {
        self.query()
            .get_models_from_ids(kind, ids.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn map_markers(&self) -> &[Record] {
        self.query().map_markers()
    }

    /// Record count per kind, keyed by plural name.
    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        Kind::ALL
            .into_iter()
            .map(|k| (k.plural(), self.store.len(k)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog(shops: usize) -> Catalog {
        let mut store = EntityStore::new();
        for i in 1..=shops {
            let mut profile = Profile::new(i.to_string(), format!("Shop {i}"));
            profile.rating = (i % 5) as f64;
            store.put(Record::from_profile(Kind::Shop, profile));
        }
        Catalog::new(store, DEFAULT_PER_PAGE)
    }

    #[test]
    fn collection_size_is_page_count() {
        let catalog = catalog(23);

        let first = catalog.list_page(Kind::Shop, 0, None, false).unwrap();
        assert_eq!(first.collection_size, 5);
        assert_eq!(first.collection.as_ref().map(Vec::len), Some(5));

        let last = catalog.list_page(Kind::Shop, 4, None, false).unwrap();
        assert_eq!(last.collection.as_ref().map(Vec::len), Some(3));

        let past = catalog.list_page(Kind::Shop, 5, None, false).unwrap();
        assert!(past.collection.is_none());
        assert_eq!(past.collection_size, 5);
    }

    #[test]
    fn out_of_range_page_omits_collection_in_json() {
        let catalog = catalog(2);
        let value = serde_json::to_value(catalog.list_page(Kind::Shop, 9, None, false).unwrap()).unwrap();
        assert_eq!(value, json!({ "collectionSize": 1 }));
    }

    #[test]
    fn empty_kind_has_no_pages() {
        let catalog = catalog(3);
        let listing = catalog.list_page(Kind::Artist, 0, None, false).unwrap();
        assert_eq!(listing.collection_size, 0);
        assert!(listing.collection.is_none());
    }

    #[test]
    fn list_page_parses_sort_names() {
        let catalog = catalog(10);
        let listing = catalog.list_page(Kind::Shop, 0, Some("rating"), false).unwrap();
        let top = listing.collection.unwrap();
        assert_eq!(top[0].profile().unwrap().rating, 4.0);

        let blank = catalog.list_page(Kind::Shop, 0, Some("  "), false).unwrap();
        assert_eq!(blank.collection.unwrap()[0].id(), "1");

        assert_eq!(
            catalog.list_page(Kind::Shop, 0, Some("weight"), false).unwrap_err(),
            CatalogError::UnknownSortField("weight".into())
        );
    }

    #[test]
    fn batch_splits_on_commas() {
        let catalog = catalog(6);
        let batch = catalog.get_batch(Kind::Shop, "4, 2,,4,99");
        let ids: Vec<&str> = batch.iter().map(|r| r.id()).collect();
        assert_eq!(ids, ["2", "4"]);
        assert!(catalog.get_batch(Kind::Shop, "").is_empty());
    }

    #[test]
    fn detail_and_markers() {
        let catalog = catalog(4);
        assert_eq!(catalog.get_one(Kind::Shop, "3").map(Record::name), Some("Shop 3"));
        assert!(catalog.get_one(Kind::Shop, "30").is_none());
        assert_eq!(catalog.map_markers().len(), 4);
        assert_eq!(catalog.counts()["shops"], 4);
        assert_eq!(catalog.counts()["items"], 0);
    }
}
