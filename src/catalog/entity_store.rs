//! One ordered collection of records per kind, addressable by id.

use crate::catalog::{Kind, Record};
use crate::error::CatalogError;
use std::collections::HashMap;

/// Records of a single kind in insertion order, with an id -> position index.
#[derive(Clone, Debug, Default)]
struct Collection {
    records: Vec<Record>,
    positions: HashMap<String, usize>,
}

impl Collection {
    fn put(&mut self, record: Record) {
        match self.positions.get(record.id()) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.positions.insert(record.id().to_string(), self.records.len());
                self.records.push(record);
            }
        }
    }

    fn get(&self, id: &str) -> Option<&Record> {
        self.positions.get(id).map(|&pos| &self.records[pos])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.positions.get(id).map(|&pos| &mut self.records[pos])
    }
}

#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    collections: [Collection; 4],
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, kind: Kind) -> &Collection {
        &self.collections[kind.index()]
    }

    fn collection_mut(&mut self, kind: Kind) -> &mut Collection {
        &mut self.collections[kind.index()]
    }

    /// Insert `record` into its kind's collection, replacing any record with the same id in place.
    pub fn put(&mut self, record: impl Into<Record>) {
        let record = record.into();
        self.collection_mut(record.kind()).put(record);
    }

    pub fn get(&self, kind: Kind, id: &str) -> Result<&Record, CatalogError> {
        self.collection(kind).get(id).ok_or_else(|| CatalogError::NotFound {
            kind,
            id: id.to_string(),
        })
    }

    pub fn get_mut(&mut self, kind: Kind, id: &str) -> Result<&mut Record, CatalogError> {
        self.collection_mut(kind).get_mut(id).ok_or_else(|| CatalogError::NotFound {
            kind,
            id: id.to_string(),
        })
    }

    pub fn contains(&self, kind: Kind, id: &str) -> bool {
        self.collection(kind).positions.contains_key(id)
    }

    /// All records of `kind` in insertion order.
    pub fn all(&self, kind: Kind) -> &[Record] {
        &self.collection(kind).records
    }

    pub fn len(&self, kind: Kind) -> usize {
        self.collection(kind).records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Item, Profile};

    fn shop(id: &str, name: &str) -> Record {
        Record::from_profile(Kind::Shop, Profile::new(id, name))
    }

    #[test]
    fn all_keeps_insertion_order() {
        let mut store = EntityStore::new();
        for id in ["1", "2", "3"] {
            store.put(shop(id, "s"));
        }
        let ids: Vec<&str> = store.all(Kind::Shop).iter().map(Record::id).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert!(store.all(Kind::Artist).is_empty());
    }

    #[test]
    fn put_overwrites_in_place() {
        let mut store = EntityStore::new();
        store.put(shop("1", "old"));
        store.put(shop("2", "other"));
        store.put(shop("1", "new"));

        assert_eq!(store.len(Kind::Shop), 2);
        assert_eq!(store.all(Kind::Shop)[0].name(), "new");
    }

    #[test]
    fn get_signals_not_found() {
        let mut store = EntityStore::new();
        store.put(Item::new("5", "Pendant", 20.0));

        assert_eq!(store.get(Kind::Item, "5").unwrap().name(), "Pendant");
        assert_eq!(
            store.get(Kind::Item, "6"),
            Err(CatalogError::NotFound { kind: Kind::Item, id: "6".into() })
        );
        assert!(store.get(Kind::Shop, "5").is_err());
    }
}
