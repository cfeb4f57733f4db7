//! Record shapes for the four entity kinds.
//!
//! Shops, artists and companies share [`Profile`]; each adds its own association
//! lists. Items carry a smaller shape plus one owner list per owner kind.

use crate::catalog::Kind;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// Fields common to shops, artists and companies.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub image: String,
    pub phone: String,
    pub email: String,
    pub tagline: String,
    pub description: String,
    pub member_since: Option<NaiveDate>,
    pub rating: f64,
    pub address: Address,
    pub position: Position,
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Shop {
    #[serde(flatten)]
    pub profile: Profile,
    pub artists: Vec<String>,
    pub companies: Vec<String>,
    #[serde(rename = "pieces")]
    pub items: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Artist {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(rename = "headshops")]
    pub shops: Vec<String>,
    pub companies: Vec<String>,
    #[serde(rename = "pieces")]
    pub items: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Company {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(rename = "headshops")]
    pub shops: Vec<String>,
    pub artists: Vec<String>,
    #[serde(rename = "pieces")]
    pub items: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    #[serde(rename = "headshops")]
    pub shops: Vec<String>,
    pub artists: Vec<String>,
    pub companies: Vec<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            ..Self::default()
        }
    }
}

/// A record of any kind, serialized as its inner shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Shop(Shop),
    Artist(Artist),
    Company(Company),
    Item(Item),
}

impl Record {
    /// Empty record of `kind` carrying only `profile`'s fields (or id and name for items).
    pub fn from_profile(kind: Kind, profile: Profile) -> Self {
        match kind {
            Kind::Shop => Record::Shop(Shop { profile, ..Shop::default() }),
            Kind::Artist => Record::Artist(Artist { profile, ..Artist::default() }),
            Kind::Company => Record::Company(Company { profile, ..Company::default() }),
            Kind::Item => Record::Item(Item {
                id: profile.id,
                name: profile.name,
                description: profile.description,
                image: profile.image,
                ..Item::default()
            }),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Record::Shop(_) => Kind::Shop,
            Record::Artist(_) => Kind::Artist,
            Record::Company(_) => Kind::Company,
            Record::Item(_) => Kind::Item,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::Shop(s) => &s.profile.id,
            Record::Artist(a) => &a.profile.id,
            Record::Company(c) => &c.profile.id,
            Record::Item(i) => &i.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Record::Shop(s) => &s.profile.name,
            Record::Artist(a) => &a.profile.name,
            Record::Company(c) => &c.profile.name,
            Record::Item(i) => &i.name,
        }
    }

    /// Shared profile; `None` for items.
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Record::Shop(s) => Some(&s.profile),
            Record::Artist(a) => Some(&a.profile),
            Record::Company(c) => Some(&c.profile),
            Record::Item(_) => None,
        }
    }

    /// Ids of `target` records associated with this one. `None` when this kind
    /// has no list for `target` (a kind never links to itself).
    pub fn links(&self, target: Kind) -> Option<&Vec<String>> {
        match (self, target) {
            (Record::Shop(s), Kind::Artist) => Some(&s.artists),
            (Record::Shop(s), Kind::Company) => Some(&s.companies),
            (Record::Shop(s), Kind::Item) => Some(&s.items),
            (Record::Artist(a), Kind::Shop) => Some(&a.shops),
            (Record::Artist(a), Kind::Company) => Some(&a.companies),
            (Record::Artist(a), Kind::Item) => Some(&a.items),
            (Record::Company(c), Kind::Shop) => Some(&c.shops),
            (Record::Company(c), Kind::Artist) => Some(&c.artists),
            (Record::Company(c), Kind::Item) => Some(&c.items),
            (Record::Item(i), Kind::Shop) => Some(&i.shops),
            (Record::Item(i), Kind::Artist) => Some(&i.artists),
            (Record::Item(i), Kind::Company) => Some(&i.companies),
            _ => None,
        }
    }

    pub fn links_mut(&mut self, target: Kind) -> Option<&mut Vec<String>> {
        match (self, target) {
            (Record::Shop(s), Kind::Artist) => Some(&mut s.artists),
            (Record::Shop(s), Kind::Company) => Some(&mut s.companies),
            (Record::Shop(s), Kind::Item) => Some(&mut s.items),
            (Record::Artist(a), Kind::Shop) => Some(&mut a.shops),
            (Record::Artist(a), Kind::Company) => Some(&mut a.companies),
            (Record::Artist(a), Kind::Item) => Some(&mut a.items),
            (Record::Company(c), Kind::Shop) => Some(&mut c.shops),
            (Record::Company(c), Kind::Artist) => Some(&mut c.artists),
            (Record::Company(c), Kind::Item) => Some(&mut c.items),
            (Record::Item(i), Kind::Shop) => Some(&mut i.shops),
            (Record::Item(i), Kind::Artist) => Some(&mut i.artists),
            (Record::Item(i), Kind::Company) => Some(&mut i.companies),
            _ => None,
        }
    }
}

impl From<Shop> for Record {
    fn from(v: Shop) -> Self {
        Record::Shop(v)
    }
}

impl From<Artist> for Record {
    fn from(v: Artist) -> Self {
        Record::Artist(v)
    }
}

impl From<Company> for Record {
    fn from(v: Company) -> Self {
        Record::Company(v)
    }
}

impl From<Item> for Record {
    fn from(v: Item) -> Self {
        Record::Item(v)
    }
}
