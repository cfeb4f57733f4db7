//! Settings validation: ranges, page size and data-source requirements.

use crate::config::{CountRange, DataSource, Settings};
use crate::error::ConfigError;

fn check_range(name: &str, range: CountRange) -> Result<(), ConfigError> {
    if range.min > range.max {
        return Err(ConfigError::Validation(format!(
            "{} range {}-{} has min above max",
            name, range.min, range.max
        )));
    }
    Ok(())
}

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.per_page == 0 {
        return Err(ConfigError::Validation("PER_PAGE must be at least 1".into()));
    }
    if settings.data_source == DataSource::Postgres && settings.database_url.is_none() {
        return Err(ConfigError::Missing("DATABASE_URL"));
    }

    let f = &settings.fixtures;
    check_range("FIXTURE_SHOPS", f.shops)?;
    check_range("FIXTURE_ARTISTS", f.artists)?;
    check_range("FIXTURE_COMPANIES", f.companies)?;
    check_range("FIXTURE_ITEMS", f.items)?;
    check_range("FIXTURE_LINKS", f.links)?;
    // every item needs an owner, so some owner kind must always be drawn non-empty
    if f.items.max > 0 && [f.shops, f.artists, f.companies].iter().all(|r| r.min == 0) {
        return Err(ConfigError::Validation(
            "FIXTURE_ITEMS needs FIXTURE_SHOPS, FIXTURE_ARTISTS or FIXTURE_COMPANIES to have a minimum above 0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Settings::default()).is_ok());
    }

    #[test]
    fn postgres_needs_a_url() {
        let settings = Settings {
            data_source: DataSource::Postgres,
            ..Settings::default()
        };
        assert!(matches!(validate(&settings), Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn zero_page_size_and_inverted_ranges_fail() {
        let mut settings = Settings {
            per_page: 0,
            ..Settings::default()
        };
        assert!(validate(&settings).is_err());

        settings.per_page = 5;
        settings.fixtures.items = CountRange::new(10, 1);
        let err = validate(&settings).unwrap_err();
        assert_eq!(err.to_string(), "validation: FIXTURE_ITEMS range 10-1 has min above max");
    }

    #[test]
    fn items_need_an_owner_kind() {
        let mut settings = Settings::default();
        settings.fixtures.shops = CountRange::new(0, 0);
        settings.fixtures.artists = CountRange::new(0, 0);
        settings.fixtures.companies = CountRange::new(0, 0);
        settings.fixtures.items = CountRange::new(3, 3);
        let err = validate(&settings).unwrap_err();
        assert!(err.to_string().contains("FIXTURE_ITEMS needs"), "{err}");

        settings.fixtures.items = CountRange::new(0, 0);
        assert!(validate(&settings).is_ok());

        settings.fixtures.items = CountRange::new(3, 3);
        settings.fixtures.companies = CountRange::new(1, 4);
        assert!(validate(&settings).is_ok());
    }
}
