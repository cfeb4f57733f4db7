//! Runtime settings read from environment variables.

use crate::catalog::DEFAULT_PER_PAGE;
use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 6166;

/// Where the catalog's records come from at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    Fixtures,
    Postgres,
}

impl FromStr for DataSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixtures" | "fixture" | "random" => Ok(DataSource::Fixtures),
            "postgres" | "postgresql" | "pg" => Ok(DataSource::Postgres),
            _ => Err(ConfigError::InvalidValue {
                key: "DATA_SOURCE",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataSource::Fixtures => "fixtures",
            DataSource::Postgres => "postgres",
        })
    }
}

/// Inclusive count range, written `20-100`, `20..100` or `50`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    fn parse(key: &'static str, raw: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        };
        let raw_trimmed = raw.trim();
        let (lo, hi) = match raw_trimmed.split_once("..").or_else(|| raw_trimmed.split_once('-')) {
            Some((lo, hi)) => (lo, hi.trim_start_matches('=')),
            None => (raw_trimmed, raw_trimmed),
        };
        let min = lo.trim().parse().map_err(|_| invalid())?;
        let max = hi.trim().parse().map_err(|_| invalid())?;
        Ok(Self { min, max })
    }
}

/// Sizes and seed for the random fixture generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureSettings {
    /// Fixed seed for reproducible fixtures; entropy when unset.
    pub seed: Option<u64>,
    pub shops: CountRange,
    pub artists: CountRange,
    pub companies: CountRange,
    pub items: CountRange,
    /// Partners attached to each shop/artist per related kind.
    pub links: CountRange,
}

impl Default for FixtureSettings {
    fn default() -> Self {
        Self {
            seed: None,
            shops: CountRange::new(20, 100),
            artists: CountRange::new(20, 100),
            companies: CountRange::new(20, 100),
            items: CountRange::new(100, 1000),
            links: CountRange::new(2, 10),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub port: u16,
    pub per_page: usize,
    pub data_source: DataSource,
    /// Enables the PostgreSQL seeder and signup.
    pub database_url: Option<String>,
    pub fixtures: FixtureSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            per_page: DEFAULT_PER_PAGE,
            data_source: DataSource::Fixtures,
            database_url: None,
            fixtures: FixtureSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Settings::default();

        if let Some(v) = get("BIND_ADDR") {
            settings.bind_addr = v;
        }
        if let Some(v) = get("PORT") {
            settings.port = parse_number("PORT", &v)?;
        }
        if let Some(v) = get("PER_PAGE") {
            settings.per_page = parse_number("PER_PAGE", &v)?;
        }
        if let Some(v) = get("DATA_SOURCE") {
            settings.data_source = v.parse()?;
        }
        settings.database_url = get("DATABASE_URL");

        let fixtures = &mut settings.fixtures;
        if let Some(v) = get("FIXTURE_SEED") {
            fixtures.seed = Some(parse_number("FIXTURE_SEED", &v)?);
        }
        for (key, slot) in [
            ("FIXTURE_SHOPS", &mut fixtures.shops),
            ("FIXTURE_ARTISTS", &mut fixtures.artists),
            ("FIXTURE_COMPANIES", &mut fixtures.companies),
            ("FIXTURE_ITEMS", &mut fixtures.items),
            ("FIXTURE_LINKS", &mut fixtures.links),
        ] {
            if let Some(v) = get(key) {
                *slot = CountRange::parse(key, &v)?;
            }
        }
        Ok(settings)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_number<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}
