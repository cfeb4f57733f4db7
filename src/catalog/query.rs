//! Pagination, sorting and id lookups over one kind's collection.

use crate::catalog::{EntityStore, Kind, Record};
use crate::error::CatalogError;
use chrono::Datelike;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

pub const DEFAULT_PER_PAGE: usize = 5;

/// Fields a collection can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Rating,
    Price,
    Email,
    Phone,
    Tagline,
    MemberSince,
    City,
    State,
    Zip,
}

impl FromStr for SortField {
    type Err = CatalogError;

    /// Accepts camelCase or snake_case, e.g. `memberSince` or `member_since`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().replace('_', "").to_ascii_lowercase().as_str() {
            "id" => SortField::Id,
            "name" => SortField::Name,
            "rating" => SortField::Rating,
            "price" => SortField::Price,
            "email" => SortField::Email,
            "phone" => SortField::Phone,
            "tagline" => SortField::Tagline,
            "membersince" => SortField::MemberSince,
            "city" => SortField::City,
            "state" => SortField::State,
            "zip" => SortField::Zip,
            _ => return Err(CatalogError::UnknownSortField(s.to_string())),
        })
    }
}

/// Comparable value extracted from a record. `Missing` orders lowest.
#[derive(Clone, Debug, PartialEq)]
enum SortKey<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
}

impl SortKey<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Less,
            (_, SortKey::Missing) => Ordering::Greater,
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

fn sort_key(record: &Record, field: SortField) -> SortKey<'_> {
    // Ids are assigned sequentially, so compare them as numbers when they parse.
    if field == SortField::Id {
        return match record.id().parse::<f64>() {
            Ok(n) => SortKey::Number(n),
            Err(_) => SortKey::Text(record.id()),
        };
    }
    if field == SortField::Name {
        return SortKey::Text(record.name());
    }
    if let Record::Item(item) = record {
        return match field {
            SortField::Price => SortKey::Number(item.price),
            _ => SortKey::Missing,
        };
    }
    let Some(p) = record.profile() else {
        return SortKey::Missing;
    };
    match field {
        SortField::Rating => SortKey::Number(p.rating),
        SortField::Email => SortKey::Text(&p.email),
        SortField::Phone => SortKey::Text(&p.phone),
        SortField::Tagline => SortKey::Text(&p.tagline),
        SortField::MemberSince => p
            .member_since
            .map(|d| SortKey::Number(d.num_days_from_ce() as f64))
            .unwrap_or(SortKey::Missing),
        SortField::City => SortKey::Text(&p.address.city),
        SortField::State => SortKey::Text(&p.address.state),
        SortField::Zip => SortKey::Text(&p.address.zip),
        SortField::Id | SortField::Name | SortField::Price => SortKey::Missing,
    }
}

/// Read-only view over an [`EntityStore`] with a fixed page size.
pub struct QueryEngine<'s> {
    store: &'s EntityStore,
    per_page: usize,
}

impl<'s> QueryEngine<'s> {
    /// `per_page` of 0 is treated as 1.
    pub fn new(store: &'s EntityStore, per_page: usize) -> Self {
        Self {
            store,
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Split `kind`'s collection into pages of `per_page`.
    ///
    /// Without `sort` the natural id order is kept. With `sort` records are
    /// ordered descending by that field; ties keep natural order. `reversed`
    /// flips the resulting sequence before it is paged.
    pub fn paginate(&self, kind: Kind, sort: Option<SortField>, reversed: bool) -> Vec<Vec<&'s Record>> {
        let mut records: Vec<&'s Record> = self.store.all(kind).iter().collect();
        if let Some(field) = sort {
            records.sort_by(|a, b| sort_key(b, field).compare(&sort_key(a, field)));
        }
        if reversed {
            records.reverse();
        }
        records.chunks(self.per_page).map(|page| page.to_vec()).collect()
    }

    /// Number of pages `paginate` would produce for `kind`.
    pub fn page_count(&self, kind: Kind) -> usize {
        self.store.len(kind).div_ceil(self.per_page)
    }

    pub fn get_model(&self, kind: Kind, id: &str) -> Option<&'s Record> {
        self.store.get(kind, id.trim()).ok()
    }

    /// Records whose id is in `ids`, in collection order, each at most once.
    pub fn get_models_from_ids<I, S>(&self, kind: Kind, ids: I) -> Vec<&'s Record>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: HashSet<String> = ids.into_iter().map(|s| s.as_ref().trim().to_string()).collect();
        if wanted.is_empty() {
            return Vec::new();
        }
        self.store
            .all(kind)
            .iter()
            .filter(|r| wanted.contains(r.id()))
            .collect()
    }

    pub fn map_markers(&self) -> &'s [Record] {
        self.store.all(Kind::Shop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Item, Profile};

    fn shops(n: usize) -> EntityStore {
        let mut store = EntityStore::new();
        for i in 1..=n {
            let mut profile = Profile::new(i.to_string(), format!("shop-{i:02}"));
            profile.rating = ((i * 7) % 11) as f64 / 2.0;
            store.put(Record::from_profile(Kind::Shop, profile));
        }
        store
    }

    fn ids(pages: &[Vec<&Record>]) -> Vec<String> {
        pages.iter().flatten().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn page_sizes_follow_per_page() {
        for n in [0usize, 1, 4, 5, 6, 23, 25] {
            let store = shops(n);
            let engine = QueryEngine::new(&store, 5);
            let pages = engine.paginate(Kind::Shop, None, false);

            assert_eq!(pages.len(), n.div_ceil(5));
            assert_eq!(engine.page_count(Kind::Shop), pages.len());
            if let Some((last, full)) = pages.split_last() {
                assert!(full.iter().all(|p| p.len() == 5));
                let expected = if n % 5 == 0 { 5 } else { n % 5 };
                assert_eq!(last.len(), expected);
            }
        }
    }

    #[test]
    fn natural_order_is_ascending_id() {
        let store = shops(12);
        let engine = QueryEngine::new(&store, 5);
        let expected: Vec<String> = (1..=12).map(|i| i.to_string()).collect();
        assert_eq!(ids(&engine.paginate(Kind::Shop, None, false)), expected);
    }

    #[test]
    fn sort_is_descending_and_reversed_flips_it() {
        let store = shops(23);
        let engine = QueryEngine::new(&store, 5);

        let sorted = engine.paginate(Kind::Shop, Some(SortField::Rating), false);
        let ratings: Vec<f64> = sorted
            .iter()
            .flatten()
            .map(|r| r.profile().unwrap().rating)
            .collect();
        assert!(ratings.windows(2).all(|w| w[0] >= w[1]));

        let mut flipped = ids(&engine.paginate(Kind::Shop, Some(SortField::Rating), true));
        flipped.reverse();
        assert_eq!(flipped, ids(&sorted));
    }

    #[test]
    fn sort_by_id_is_numeric_descending() {
        let store = shops(12);
        let engine = QueryEngine::new(&store, 100);
        let sorted = ids(&engine.paginate(Kind::Shop, Some(SortField::Id), false));
        assert_eq!(sorted.first().map(String::as_str), Some("12"));
        assert_eq!(sorted.last().map(String::as_str), Some("1"));
    }

    #[test]
    fn reversed_without_sort_is_descending_id() {
        let store = shops(3);
        let engine = QueryEngine::new(&store, 5);
        assert_eq!(ids(&engine.paginate(Kind::Shop, None, true)), ["3", "2", "1"]);
    }

    #[test]
    fn items_sort_by_price_and_ignore_rating() {
        let mut store = EntityStore::new();
        store.put(Item::new("1", "a", 10.0));
        store.put(Item::new("2", "b", 300.0));
        store.put(Item::new("3", "c", 55.5));
        let engine = QueryEngine::new(&store, 5);

        assert_eq!(ids(&engine.paginate(Kind::Item, Some(SortField::Price), false)), ["2", "3", "1"]);
        // every item is missing a rating, so natural order survives the stable sort
        assert_eq!(ids(&engine.paginate(Kind::Item, Some(SortField::Rating), false)), ["1", "2", "3"]);
    }

    #[test]
    fn get_model_returns_the_stored_record_or_none() {
        let mut store = shops(3);
        let mut profile = Profile::new("7", "Gilded Flame");
        profile.rating = 4.5;
        profile.email = "hello@gilded.example".into();
        profile.member_since = chrono::NaiveDate::from_ymd_opt(2014, 6, 1);
        let inserted = Record::from_profile(Kind::Shop, profile);
        store.put(inserted.clone());
        let item = Record::from(Item::new("2", "Bubbler", 75.0));
        store.put(item.clone());

        let engine = QueryEngine::new(&store, 5);
        assert_eq!(engine.get_model(Kind::Shop, "7"), Some(&inserted));
        assert_eq!(engine.get_model(Kind::Item, "2"), Some(&item));
        assert_eq!(engine.get_model(Kind::Shop, "1"), Some(&store.all(Kind::Shop)[0]));
        assert!(engine.get_model(Kind::Shop, "4").is_none());
        assert!(engine.get_model(Kind::Artist, "1").is_none());
    }

    #[test]
    fn batch_lookup_dedups_and_keeps_collection_order() {
        let store = shops(6);
        let engine = QueryEngine::new(&store, 5);
        let found = engine.get_models_from_ids(Kind::Shop, ["5", "2", "5", "42"]);
        let found: Vec<&str> = found.iter().map(|r| r.id()).collect();
        assert_eq!(found, ["2", "5"]);
        assert!(engine.get_models_from_ids(Kind::Shop, Vec::<String>::new()).is_empty());
    }

    #[test]
    fn sort_field_names() {
        assert_eq!("memberSince".parse::<SortField>().unwrap(), SortField::MemberSince);
        assert_eq!("member_since".parse::<SortField>().unwrap(), SortField::MemberSince);
        assert_eq!("Rating".parse::<SortField>().unwrap(), SortField::Rating);
        assert!("weight".parse::<SortField>().is_err());
    }
}
