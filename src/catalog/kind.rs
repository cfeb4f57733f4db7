//! Entity kinds and their wire names.

use crate::error::CatalogError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Shop,
    Artist,
    Company,
    Item,
}

impl Kind {
    /// All kinds in collection order.
    pub const ALL: [Kind; 4] = [Kind::Shop, Kind::Artist, Kind::Company, Kind::Item];

    /// The three kinds that can own items and link to each other.
    pub const OWNERS: [Kind; 3] = [Kind::Shop, Kind::Artist, Kind::Company];

    pub fn index(self) -> usize {
        match self {
            Kind::Shop => 0,
            Kind::Artist => 1,
            Kind::Company => 2,
            Kind::Item => 3,
        }
    }

    /// Collection path segment, e.g. `GET /shops`.
    pub fn plural(self) -> &'static str {
        match self {
            Kind::Shop => "shops",
            Kind::Artist => "artists",
            Kind::Company => "companies",
            Kind::Item => "items",
        }
    }

    /// Detail path segment, e.g. `GET /shop/:id`.
    pub fn singular(self) -> &'static str {
        match self {
            Kind::Shop => "shop",
            Kind::Artist => "artist",
            Kind::Company => "company",
            Kind::Item => "item",
        }
    }

    /// Older clients still request `headshops` and `pieces`.
    pub fn legacy_names(self) -> Option<(&'static str, &'static str)> {
        match self {
            Kind::Shop => Some(("headshops", "headshop")),
            Kind::Item => Some(("pieces", "piece")),
            Kind::Artist | Kind::Company => None,
        }
    }

    pub fn is_owner(self) -> bool {
        !matches!(self, Kind::Item)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl FromStr for Kind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Kind::ALL
            .into_iter()
            .find(|k| {
                name == k.plural()
                    || name == k.singular()
                    || k.legacy_names()
                        .map(|(plural, singular)| name == plural || name == singular)
                        .unwrap_or(false)
            })
            .ok_or_else(|| CatalogError::InvalidKind(s.to_string()))
    }
}
