#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use glassfinder::catalog::{AssociationIndex, EntityRef, Item, Profile};
use glassfinder::{AppState, Catalog, DataSource, EntityStore, Kind, Record};
use serde_json::Value;
use tower::ServiceExt;

/// 23 shops rated `id % 5`, 3 artists, 2 companies, 4 items, with a few links.
pub fn sample_store() -> EntityStore {
    let mut store = EntityStore::new();
    for i in 1..=23 {
        let mut profile = Profile::new(i.to_string(), format!("Shop {i}"));
        profile.rating = (i % 5) as f64;
        store.put(Record::from_profile(Kind::Shop, profile));
    }
    for i in 1..=3 {
        store.put(Record::from_profile(Kind::Artist, Profile::new(i.to_string(), format!("Artist {i}"))));
    }
    for i in 1..=2 {
        store.put(Record::from_profile(Kind::Company, Profile::new(i.to_string(), format!("Company {i}"))));
    }
    for (i, price) in [(1, 25.0), (2, 180.0), (3, 60.5), (4, 12.0)] {
        store.put(Item::new(i.to_string(), format!("Piece {i}"), price));
    }

    let links = [
        (Kind::Shop, "1", Kind::Artist, "2"),
        (Kind::Shop, "1", Kind::Company, "1"),
        (Kind::Artist, "2", Kind::Company, "2"),
        (Kind::Item, "1", Kind::Shop, "1"),
        (Kind::Item, "2", Kind::Artist, "3"),
    ];
    for (a, a_id, b, b_id) in links {
        AssociationIndex::link(&mut store, EntityRef::new(a, a_id), EntityRef::new(b, b_id)).unwrap();
    }
    store
}

pub fn sample_app() -> Router {
    let catalog = Catalog::new(sample_store(), 5);
    glassfinder::app(AppState::new(catalog, None, DataSource::Fixtures))
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub fn ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["id"].as_str().expect("id").to_string())
        .collect()
}
