//! Mirrored links between records.
//!
//! Adjacency lists live on the records themselves. Every link is written on
//! both endpoints: shop/artist/company pairs are many-to-many, and an item
//! link also lands on the owner's `items` list.

use crate::catalog::{EntityStore, Kind};
use crate::error::CatalogError;

/// One endpoint of a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityRef<'a> {
    pub kind: Kind,
    pub id: &'a str,
}

impl<'a> EntityRef<'a> {
    pub fn new(kind: Kind, id: &'a str) -> Self {
        Self { kind, id }
    }
}

pub struct AssociationIndex;

impl AssociationIndex {
    /// Link `a` and `b` on both sides. Returns `Ok(false)` without touching
    /// either record when `a` already lists `b`.
    pub fn link(store: &mut EntityStore, a: EntityRef<'_>, b: EntityRef<'_>) -> Result<bool, CatalogError> {
        if a.kind == b.kind {
            return Err(CatalogError::InvalidLink { from: a.kind, to: b.kind });
        }
        if !store.contains(b.kind, b.id) {
            return Err(CatalogError::NotFound {
                kind: b.kind,
                id: b.id.to_string(),
            });
        }

        let forward = store
            .get_mut(a.kind, a.id)?
            .links_mut(b.kind)
            .ok_or(CatalogError::InvalidLink { from: a.kind, to: b.kind })?;
        if forward.iter().any(|id| id == b.id) {
            return Ok(false);
        }
        forward.push(b.id.to_string());

        let backward = store
            .get_mut(b.kind, b.id)?
            .links_mut(a.kind)
            .ok_or(CatalogError::InvalidLink { from: b.kind, to: a.kind })?;
        if !backward.iter().any(|id| id == a.id) {
            backward.push(a.id.to_string());
        }
        Ok(true)
    }

    /// Ids of `target` records linked to `(kind, id)`.
    pub fn linked<'s>(store: &'s EntityStore, kind: Kind, id: &str, target: Kind) -> Result<&'s [String], CatalogError> {
        let record = store.get(kind, id)?;
        record
            .links(target)
            .map(Vec::as_slice)
            .ok_or(CatalogError::InvalidLink { from: kind, to: target })
    }

    /// True when `a` lists `b`.
    pub fn is_linked(store: &EntityStore, a: EntityRef<'_>, b: EntityRef<'_>) -> bool {
        Self::linked(store, a.kind, a.id, b.kind)
            .map(|ids| ids.iter().any(|id| id == b.id))
            .unwrap_or(false)
    }
}
