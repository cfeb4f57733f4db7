//! PostgreSQL tables behind the persistence-backed catalog and signup.
//!
//! Column and join-table names match the schema the original Sequelize models
//! created (`"memberSince"`, `"HeadshopArtist"."Headshop_uid"`, ...), so an
//! existing database can be read as is.

use crate::catalog::{Kind, Profile};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{ConnectOptions, PgPool, Row};
use std::str::FromStr;

/// Profile-shaped tables per owner kind.
pub const PROFILE_TABLES: [(Kind, &str); 3] = [
    (Kind::Shop, "headshops"),
    (Kind::Artist, "artists"),
    (Kind::Company, "companies"),
];

pub const USERS_TABLE: &str = "users";
pub const PIECES_TABLE: &str = "pieces";

/// A many-to-many join table between two owner kinds.
#[derive(Clone, Copy, Debug)]
pub struct JoinTable {
    pub name: &'static str,
    pub left: (Kind, &'static str),
    pub right: (Kind, &'static str),
}

pub const JOIN_TABLES: [JoinTable; 3] = [
    JoinTable {
        name: "HeadshopArtist",
        left: (Kind::Shop, "Headshop_uid"),
        right: (Kind::Artist, "Artist_uid"),
    },
    JoinTable {
        name: "HeadshopCompany",
        left: (Kind::Shop, "Headshop_uid"),
        right: (Kind::Company, "Company_uid"),
    },
    JoinTable {
        name: "ArtistCompany",
        left: (Kind::Artist, "Artist_uid"),
        right: (Kind::Company, "Company_uid"),
    },
];

/// Item owner columns on `pieces`.
pub const PIECE_OWNER_COLUMNS: [(Kind, &str); 3] = [
    (Kind::Shop, "headshopId"),
    (Kind::Artist, "artistId"),
    (Kind::Company, "companyId"),
];

const PROFILE_COLUMNS_DDL: &str = r#"
    id SERIAL PRIMARY KEY,
    name VARCHAR(255),
    image VARCHAR(255),
    phone VARCHAR(255),
    email VARCHAR(255),
    tagline TEXT,
    description TEXT,
    "memberSince" TIMESTAMPTZ,
    rating DOUBLE PRECISION,
    street VARCHAR(255),
    city VARCHAR(255),
    state VARCHAR(255),
    zip VARCHAR(255),
    lat DOUBLE PRECISION,
    lng DOUBLE PRECISION,
    "createdAt" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT NOW()
"#;

/// Select list producing the columns [`profile_from_row`] reads.
pub const PROFILE_SELECT: &str = r#"id, name, image, phone, email, tagline, description,
    "memberSince" AS member_since, rating, street, city, state, zip, lat, lng"#;

/// Create the users, profile, pieces and join tables if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for table in std::iter::once(USERS_TABLE).chain(PROFILE_TABLES.iter().map(|(_, t)| *t)) {
        let ddl = format!("CREATE TABLE IF NOT EXISTS {} ({})", quote_ident(table), PROFILE_COLUMNS_DDL);
        sqlx::query(&ddl).execute(pool).await?;
    }

    let pieces_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255),
            image VARCHAR(255),
            description TEXT,
            price DOUBLE PRECISION,
            "headshopId" INTEGER REFERENCES headshops (id) ON DELETE SET NULL,
            "artistId" INTEGER REFERENCES artists (id) ON DELETE SET NULL,
            "companyId" INTEGER REFERENCES companies (id) ON DELETE SET NULL,
            "createdAt" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        quote_ident(PIECES_TABLE)
    );
    sqlx::query(&pieces_ddl).execute(pool).await?;

    for join in JOIN_TABLES {
        let left_table = table_for(join.left.0);
        let right_table = table_for(join.right.0);
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {name} (
                {left} INTEGER NOT NULL REFERENCES {left_table} (id) ON DELETE CASCADE,
                {right} INTEGER NOT NULL REFERENCES {right_table} (id) ON DELETE CASCADE,
                "createdAt" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                "updatedAt" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY ({left}, {right})
            )
            "#,
            name = quote_ident(join.name),
            left = quote_ident(join.left.1),
            right = quote_ident(join.right.1),
        );
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::debug!("catalog tables ensured");
    Ok(())
}

/// Table holding records of an owner kind. Items live in `pieces`.
pub fn table_for(kind: Kind) -> &'static str {
    PROFILE_TABLES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, t)| *t)
        .unwrap_or(PIECES_TABLE)
}

/// Map a row selected with [`PROFILE_SELECT`] to a profile. Null columns become defaults.
pub fn profile_from_row(row: &PgRow) -> Result<Profile, sqlx::Error> {
    let text = |name: &str| -> Result<String, sqlx::Error> {
        Ok(row.try_get::<Option<String>, _>(name)?.unwrap_or_default())
    };
    let number = |name: &str| -> Result<f64, sqlx::Error> {
        Ok(row.try_get::<Option<f64>, _>(name)?.unwrap_or_default())
    };
    let id: i32 = row.try_get("id")?;
    let member_since: Option<DateTime<Utc>> = row.try_get("member_since")?;
    Ok(Profile {
        id: id.to_string(),
        name: text("name")?,
        image: text("image")?,
        phone: text("phone")?,
        email: text("email")?,
        tagline: text("tagline")?,
        description: text("description")?,
        member_since: member_since.map(|d| d.date_naive()),
        rating: number("rating")?,
        address: crate::catalog::Address {
            street: text("street")?,
            city: text("city")?,
            state: text("state")?,
            zip: text("zip")?,
        },
        position: crate::catalog::Position {
            lat: number("lat")?,
            lng: number("lng")?,
        },
    })
}

/// A signed-up user as returned to the client.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

/// Insert a user row from `profile` (its id is ignored) and return it with the assigned id.
pub async fn insert_user(pool: &PgPool, profile: &Profile) -> Result<User, AppError> {
    let sql = format!(
        r#"
        INSERT INTO {} (name, image, phone, email, tagline, description, "memberSince", rating,
                        street, city, state, zip, lat, lng)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING id, "createdAt" AS created_at
        "#,
        quote_ident(USERS_TABLE)
    );
    let member_since = profile
        .member_since
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());
    tracing::debug!(sql = %sql, email = %profile.email, "insert user");
    let row = sqlx::query(&sql)
        .bind(&profile.name)
        .bind(&profile.image)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.tagline)
        .bind(&profile.description)
        .bind(member_since)
        .bind(profile.rating)
        .bind(&profile.address.street)
        .bind(&profile.address.city)
        .bind(&profile.address.state)
        .bind(&profile.address.zip)
        .bind(profile.position.lat)
        .bind(profile.position.lng)
        .fetch_one(pool)
        .await?;
    let id: i32 = row.try_get("id")?;
    Ok(User {
        profile: Profile {
            id: id.to_string(),
            ..profile.clone()
        },
        created_at: row.try_get("created_at")?,
    })
}

/// Create the database named in `database_url` if it does not exist yet.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
