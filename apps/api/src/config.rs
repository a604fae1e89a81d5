use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::generation::{GeneratorBounds, MAX_BOUND};

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Generation results kept in memory before the oldest is evicted.
    pub worksheet_store_capacity: usize,
    pub generator_bounds: GeneratorBounds,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            worksheet_store_capacity: 64,
            generator_bounds: GeneratorBounds::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let bounds = GeneratorBounds {
            max_denominator: env_or("MAX_DENOMINATOR", defaults.generator_bounds.max_denominator)?,
            max_numerator: env_or("MAX_NUMERATOR", defaults.generator_bounds.max_numerator)?,
            max_whole: env_or("MAX_WHOLE", defaults.generator_bounds.max_whole)?,
        };
        validate_bounds(&bounds)?;

        let worksheet_store_capacity =
            env_or("WORKSHEET_STORE_CAPACITY", defaults.worksheet_store_capacity)?;
        ensure!(
            worksheet_store_capacity >= 1,
            "WORKSHEET_STORE_CAPACITY must be at least 1"
        );

        Ok(Config {
            port: env_or("PORT", defaults.port).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            worksheet_store_capacity,
            generator_bounds: bounds,
        })
    }
}

/// Checks that every generator range is non-empty and at most `MAX_BOUND`.
pub fn validate_bounds(bounds: &GeneratorBounds) -> Result<()> {
    let ranges = [
        ("MAX_DENOMINATOR", bounds.max_denominator, 2),
        ("MAX_NUMERATOR", bounds.max_numerator, 1),
        ("MAX_WHOLE", bounds.max_whole, 1),
    ];
    for (key, value, min) in ranges {
        ensure!(
            (min..=MAX_BOUND).contains(&value),
            "{key} must be between {min} and {MAX_BOUND}, got {value}"
        );
    }
    Ok(())
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_are_valid() {
        assert!(validate_bounds(&Config::default().generator_bounds).is_ok());
    }

    #[test]
    fn test_validate_bounds_rejects_unit_denominator() {
        let bounds = GeneratorBounds {
            max_denominator: 1,
            ..GeneratorBounds::default()
        };
        let err = validate_bounds(&bounds).unwrap_err();
        assert!(err.to_string().contains("MAX_DENOMINATOR"));
    }

    #[test]
    fn test_validate_bounds_rejects_zero_whole() {
        let bounds = GeneratorBounds {
            max_whole: 0,
            ..GeneratorBounds::default()
        };
        assert!(validate_bounds(&bounds).is_err());
    }

    #[test]
    fn test_validate_bounds_rejects_large_bounds() {
        let huge = GeneratorBounds {
            max_denominator: 4_000_000_000,
            max_numerator: 12,
            max_whole: 4_000_000_000,
        };
        let err = validate_bounds(&huge).unwrap_err();
        assert!(err.to_string().contains("MAX_DENOMINATOR"));

        let three_digit_whole = GeneratorBounds {
            max_whole: 100,
            ..GeneratorBounds::default()
        };
        let err = validate_bounds(&three_digit_whole).unwrap_err();
        assert!(err.to_string().contains("MAX_WHOLE"));
    }

    #[test]
    fn test_validate_bounds_accepts_largest_bounds() {
        let largest = GeneratorBounds {
            max_denominator: MAX_BOUND,
            max_numerator: MAX_BOUND,
            max_whole: MAX_BOUND,
        };
        assert!(validate_bounds(&largest).is_ok());
    }

    #[test]
    fn test_env_or_missing_key_uses_default() {
        let value: u32 = env_or("DRILLSHEET_TEST_UNSET_VARIABLE", 17).unwrap();
        assert_eq!(value, 17);
    }
}
