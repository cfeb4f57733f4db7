//! Load the catalog from PostgreSQL tables.

use crate::catalog::{AssociationIndex, EntityRef, EntityStore, Item, Kind, Record};
use crate::error::{AppError, CatalogError};
use crate::seed::Seeder;
use crate::store::{
    profile_from_row, quote_ident, table_for, JOIN_TABLES, PIECES_TABLE, PIECE_OWNER_COLUMNS, PROFILE_SELECT,
    PROFILE_TABLES,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// Seeds from the `headshops`, `artists`, `companies`, `pieces` and join tables.
pub struct PgSeeder {
    pool: PgPool,
}

impl PgSeeder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_profiles(&self, store: &mut EntityStore) -> Result<(), AppError> {
        for (kind, table) in PROFILE_TABLES {
            let sql = format!("SELECT {} FROM {} ORDER BY id", PROFILE_SELECT, quote_ident(table));
            tracing::debug!(sql = %sql, "query");
            let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
            for row in &rows {
                store.put(Record::from_profile(kind, profile_from_row(row)?));
            }
        }
        Ok(())
    }

    async fn load_pieces(&self, store: &mut EntityStore) -> Result<(), AppError> {
        let sql = format!(
            r#"SELECT id, title, image, description, price, "headshopId", "artistId", "companyId" FROM {} ORDER BY id"#,
            quote_ident(PIECES_TABLE)
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let mut owners = Vec::new();
        for row in &rows {
            let id: i32 = row.try_get("id")?;
            let id = id.to_string();
            store.put(Item {
                description: row.try_get::<Option<String>, _>("description")?.unwrap_or_default(),
                image: row.try_get::<Option<String>, _>("image")?.unwrap_or_default(),
                ..Item::new(
                    id.clone(),
                    row.try_get::<Option<String>, _>("title")?.unwrap_or_default(),
                    row.try_get::<Option<f64>, _>("price")?.unwrap_or_default(),
                )
            });
            for (kind, column) in PIECE_OWNER_COLUMNS {
                if let Some(owner) = row.try_get::<Option<i32>, _>(column)? {
                    owners.push((id.clone(), kind, owner.to_string()));
                }
            }
        }
        for (item, kind, owner) in owners {
            link_or_skip(store, EntityRef::new(Kind::Item, &item), EntityRef::new(kind, &owner))?;
        }
        Ok(())
    }

    async fn load_links(&self, store: &mut EntityStore) -> Result<(), AppError> {
        for join in JOIN_TABLES {
            let sql = format!(
                "SELECT {left}, {right} FROM {table} ORDER BY {left}, {right}",
                left = quote_ident(join.left.1),
                right = quote_ident(join.right.1),
                table = quote_ident(join.name),
            );
            tracing::debug!(sql = %sql, "query");
            let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
            for row in &rows {
                let left: i32 = row.try_get(0)?;
                let right: i32 = row.try_get(1)?;
                link_or_skip(
                    store,
                    EntityRef::new(join.left.0, &left.to_string()),
                    EntityRef::new(join.right.0, &right.to_string()),
                )?;
            }
        }
        Ok(())
    }
}

/// Link two records, logging and skipping rows that point at missing records.
fn link_or_skip(store: &mut EntityStore, a: EntityRef<'_>, b: EntityRef<'_>) -> Result<(), CatalogError> {
    match AssociationIndex::link(store, a, b) {
        Ok(_) => Ok(()),
        Err(CatalogError::NotFound { kind, id }) => {
            tracing::warn!(kind = %kind, id = %id, table = table_for(kind), "dangling reference skipped");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[async_trait]
impl Seeder for PgSeeder {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn seed(&self) -> Result<EntityStore, AppError> {
        let mut store = EntityStore::new();
        self.load_profiles(&mut store).await?;
        self.load_pieces(&mut store).await?;
        self.load_links(&mut store).await?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Profile;

    #[test]
    fn dangling_links_are_skipped() {
        let mut store = EntityStore::new();
        store.put(Record::from_profile(Kind::Shop, Profile::new("1", "Kiln")));
        store.put(Record::from_profile(Kind::Artist, Profile::new("1", "Ada")));

        link_or_skip(&mut store, EntityRef::new(Kind::Shop, "1"), EntityRef::new(Kind::Artist, "7")).unwrap();
        link_or_skip(&mut store, EntityRef::new(Kind::Shop, "1"), EntityRef::new(Kind::Artist, "1")).unwrap();

        let linked = AssociationIndex::linked(&store, Kind::Shop, "1", Kind::Artist).unwrap();
        assert_eq!(linked, ["1"]);
        assert!(link_or_skip(&mut store, EntityRef::new(Kind::Shop, "1"), EntityRef::new(Kind::Shop, "1")).is_err());
    }
}
