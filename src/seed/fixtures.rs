//! Random fixture data: profiles, items and the links between them.

use crate::catalog::{AssociationIndex, EntityRef, EntityStore, Item, Kind, Profile, Record};
use crate::config::{CountRange, FixtureSettings};
use crate::error::{AppError, CatalogError};
use crate::seed::Seeder;
use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.it/400x400";

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bo", "Cleo", "Dante", "Esme", "Felix", "Greta", "Hugo", "Iris", "Jonah", "Kira", "Luca",
    "Maya", "Nico", "Opal", "Pia", "Quinn", "Rhea", "Silas", "Tess", "Uma", "Vince", "Wren", "Zane",
];

const LAST_NAMES: &[&str] = &[
    "Alvarez", "Brooks", "Castillo", "Dunn", "Ellison", "Fischer", "Garner", "Holt", "Ingram", "Jensen",
    "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Park", "Reyes", "Sato", "Tanaka", "Vega",
];

const WORDS: &[&str] = &[
    "amber", "basin", "cobalt", "drift", "ember", "flint", "glow", "haze", "indigo", "juniper", "kiln",
    "lumen", "marble", "nectar", "onyx", "prism", "quartz", "ripple", "slate", "tide", "umber", "vapor",
    "willow", "zephyr", "spiral", "fumed", "frit", "torch", "bead", "swirl",
];

const STREETS: &[&str] = &["Oak", "Maple", "Cedar", "Pine", "Elm", "Lake", "Hill", "Main", "Park", "River"];
const STREET_SUFFIXES: &[&str] = &["St", "Ave", "Rd", "Blvd", "Ln", "Way", "Ct"];
const CITIES: &[&str] = &[
    "Portland", "Eugene", "Asheville", "Boulder", "Austin", "Tucson", "Olympia", "Burlington", "Madison",
    "Santa Cruz", "Missoula", "Bend",
];
const STATES: &[&str] = &["OR", "WA", "CA", "CO", "TX", "AZ", "NC", "VT", "WI", "MT", "NM", "MI"];
const DOMAINS: &[&str] = &["example.com", "mail.test", "glass.test", "studio.test"];

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &'static [&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let body: Vec<&str> = (0..words).map(|_| pick(rng, WORDS)).collect();
    format!("{}.", capitalize(&body.join(" ")))
}

fn paragraph<R: Rng + ?Sized>(rng: &mut R, sentences: usize) -> String {
    (0..sentences)
        .map(|_| {
            let len = rng.gen_range(5..=12);
            sentence(rng, len)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// A profile filled with random contact, address and rating data.
pub fn random_profile<R: Rng + ?Sized>(rng: &mut R, id: impl Into<String>) -> Profile {
    let first = pick(rng, FIRST_NAMES).to_ascii_lowercase();
    let last = pick(rng, LAST_NAMES).to_ascii_lowercase();
    Profile {
        id: id.into(),
        name: person_name(rng),
        image: PLACEHOLDER_IMAGE.to_string(),
        phone: format!(
            "{}-{}-{}",
            rng.gen_range(100..=999),
            rng.gen_range(100..=999),
            rng.gen_range(1000..=9999)
        ),
        email: format!("{}.{}@{}", first, last, pick(rng, DOMAINS)),
        tagline: sentence(rng, 4),
        description: paragraph(rng, 5),
        member_since: NaiveDate::from_ymd_opt(
            rng.gen_range(2000..=2020),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        ),
        rating: round2(rng.gen_range(0.0..=5.0)),
        address: crate::catalog::Address {
            street: format!(
                "{} {} {}",
                rng.gen_range(1..=9999),
                pick(rng, STREETS),
                pick(rng, STREET_SUFFIXES)
            ),
            city: pick(rng, CITIES).to_string(),
            state: pick(rng, STATES).to_string(),
            zip: format!("{:05}", rng.gen_range(10000..=99999)),
        },
        position: crate::catalog::Position {
            lat: (rng.gen_range(-90.0..=90.0_f64) * 1e5).round() / 1e5,
            lng: (rng.gen_range(-180.0..=180.0_f64) * 1e5).round() / 1e5,
        },
    }
}

fn random_owner<R: Rng + ?Sized>(rng: &mut R, kind: Kind, id: usize) -> Record {
    let mut profile = random_profile(rng, id.to_string());
    match kind {
        Kind::Shop => profile.name = capitalize(pick(rng, WORDS)),
        Kind::Company => {
            profile.name = format!("{} {}", capitalize(pick(rng, WORDS)), pick(rng, &["Glassworks", "Supply", "Co.", "Labs"]))
        }
        Kind::Artist | Kind::Item => {}
    }
    Record::from_profile(kind, profile)
}

fn random_item<R: Rng + ?Sized>(rng: &mut R, id: usize) -> Item {
    Item {
        description: paragraph(rng, 5),
        image: PLACEHOLDER_IMAGE.to_string(),
        ..Item::new(id.to_string(), capitalize(pick(rng, WORDS)), round2(rng.gen_range(10.0..=300.0)))
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, range: CountRange) -> usize {
    rng.gen_range(range.min..=range.max)
}

/// Give every `from` record a random number of distinct `to` partners.
/// The count is capped by the size of `to` so redraws always terminate.
fn link_random<R: Rng + ?Sized>(
    rng: &mut R,
    store: &mut EntityStore,
    from: Kind,
    to: Kind,
    links: CountRange,
) -> Result<(), CatalogError> {
    let partners = store.len(to);
    if partners == 0 {
        return Ok(());
    }
    let ids: Vec<String> = store.all(from).iter().map(|r| r.id().to_string()).collect();
    for id in &ids {
        let wanted = draw(rng, links).min(partners);
        while AssociationIndex::linked(store, from, id, to)?.len() < wanted {
            let partner = rng.gen_range(1..=partners).to_string();
            AssociationIndex::link(store, EntityRef::new(from, id), EntityRef::new(to, &partner))?;
        }
    }
    Ok(())
}

/// Attach each item to exactly one owner of one randomly chosen owner kind.
fn assign_owners<R: Rng + ?Sized>(rng: &mut R, store: &mut EntityStore) -> Result<(), CatalogError> {
    let items = store.len(Kind::Item);
    let kinds: Vec<Kind> = Kind::OWNERS.into_iter().filter(|k| store.len(*k) > 0).collect();
    if kinds.is_empty() {
        return if items == 0 { Ok(()) } else { Err(CatalogError::Unowned(items)) };
    }
    for n in 1..=items {
        let item = n.to_string();
        let owner_kind = *kinds.choose(rng).unwrap_or(&Kind::Shop);
        let owner = rng.gen_range(1..=store.len(owner_kind)).to_string();
        AssociationIndex::link(store, EntityRef::new(Kind::Item, &item), EntityRef::new(owner_kind, &owner))?;
    }
    Ok(())
}

/// Build a fully linked store from `rng`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, settings: &FixtureSettings) -> Result<EntityStore, CatalogError> {
    let mut store = EntityStore::new();
    for (kind, range) in [
        (Kind::Shop, settings.shops),
        (Kind::Artist, settings.artists),
        (Kind::Company, settings.companies),
    ] {
        for id in 1..=draw(rng, range) {
            store.put(random_owner(rng, kind, id));
        }
    }
    for id in 1..=draw(rng, settings.items) {
        store.put(random_item(rng, id));
    }

    link_random(rng, &mut store, Kind::Shop, Kind::Artist, settings.links)?;
    link_random(rng, &mut store, Kind::Shop, Kind::Company, settings.links)?;
    link_random(rng, &mut store, Kind::Artist, Kind::Company, settings.links)?;
    assign_owners(rng, &mut store)?;
    Ok(store)
}

/// Seeds the catalog with random records.
pub struct FixtureSeeder {
    settings: FixtureSettings,
}

impl FixtureSeeder {
    pub fn new(settings: FixtureSettings) -> Self {
        Self { settings }
    }

    pub fn generate(&self) -> Result<EntityStore, CatalogError> {
        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        generate(&mut rng, &self.settings)
    }
}

#[async_trait]
impl Seeder for FixtureSeeder {
    fn name(&self) -> &'static str {
        "fixtures"
    }

    async fn seed(&self) -> Result<EntityStore, AppError> {
        Ok(self.generate()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> FixtureSettings {
        FixtureSettings {
            seed: Some(7),
            shops: CountRange::new(6, 12),
            artists: CountRange::new(6, 12),
            companies: CountRange::new(3, 5),
            items: CountRange::new(30, 60),
            links: CountRange::new(2, 10),
        }
    }

    #[test]
    fn counts_fall_in_ranges() {
        let store = FixtureSeeder::new(small()).generate().unwrap();
        assert!((6..=12).contains(&store.len(Kind::Shop)));
        assert!((3..=5).contains(&store.len(Kind::Company)));
        assert!((30..=60).contains(&store.len(Kind::Item)));
        let ids: Vec<String> = store.all(Kind::Shop).iter().map(|r| r.id().to_string()).collect();
        let expected: Vec<String> = (1..=ids.len()).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn link_counts_are_capped_by_partner_count() {
        let store = FixtureSeeder::new(small()).generate().unwrap();
        let companies = store.len(Kind::Company);
        for shop in store.all(Kind::Shop) {
            let linked = shop.links(Kind::Company).unwrap().len();
            assert!(linked >= 2.min(companies));
            assert!(linked <= companies);
        }
    }

    #[test]
    fn same_seed_same_fixtures() {
        let a = FixtureSeeder::new(small()).generate().unwrap();
        let b = FixtureSeeder::new(small()).generate().unwrap();
        for kind in Kind::ALL {
            assert_eq!(a.all(kind), b.all(kind));
        }
    }

    #[test]
    fn empty_partner_kinds_are_skipped() {
        let settings = FixtureSettings {
            seed: Some(1),
            artists: CountRange::new(0, 0),
            companies: CountRange::new(0, 0),
            shops: CountRange::new(2, 2),
            items: CountRange::new(5, 5),
            links: CountRange::new(2, 10),
        };
        let store = FixtureSeeder::new(settings).generate().unwrap();
        for item in store.all(Kind::Item) {
            assert_eq!(item.links(Kind::Shop).map(Vec::len), Some(1));
        }
    }

    #[test]
    fn items_without_any_owner_kind_are_an_error() {
        let settings = FixtureSettings {
            seed: Some(1),
            shops: CountRange::new(0, 0),
            artists: CountRange::new(0, 0),
            companies: CountRange::new(0, 0),
            items: CountRange::new(3, 3),
            links: CountRange::new(2, 10),
        };
        assert_eq!(FixtureSeeder::new(settings.clone()).generate().err(), Some(CatalogError::Unowned(3)));

        let empty = FixtureSettings {
            items: CountRange::new(0, 0),
            ..settings
        };
        assert!(FixtureSeeder::new(empty).generate().is_ok());
    }

    #[test]
    fn random_profile_shapes() {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = random_profile(&mut rng, "9");
        assert_eq!(profile.id, "9");
        assert!((0.0..=5.0).contains(&profile.rating));
        assert_eq!(profile.phone.len(), 12);
        assert!(profile.email.contains('@'));
        assert_eq!(profile.address.zip.len(), 5);
        assert!(profile.member_since.is_some());
        assert!(profile.tagline.ends_with('.'));
    }
}
