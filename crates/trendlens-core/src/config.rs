use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("TRENDLENS_ENV", "development"))?;
    let log_level = or_default("TRENDLENS_LOG_LEVEL", "info");
    let taxonomy_path = lookup("TRENDLENS_TAXONOMY_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let max_batch_size = parse_usize("TRENDLENS_MAX_BATCH_SIZE", "5000")?;
    if max_batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRENDLENS_MAX_BATCH_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let keyword_min_records = parse_usize("TRENDLENS_KEYWORD_MIN_RECORDS", "5")?;

    Ok(AppConfig {
        env,
        log_level,
        taxonomy_path,
        max_batch_size,
        keyword_min_records,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TRENDLENS_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(
            parse_environment("development").unwrap(),
            Environment::Development
        );
        assert_eq!(parse_environment("test").unwrap(), Environment::Test);
        assert_eq!(
            parse_environment("production").unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn parse_environment_unknown_fails() {
        let err = parse_environment("staging").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar { ref var, .. } if var == "TRENDLENS_ENV"
        ));
    }

    #[test]
    fn build_app_config_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.taxonomy_path.is_none());
        assert_eq!(cfg.max_batch_size, 5000);
        assert_eq!(cfg.keyword_min_records, 5);
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("TRENDLENS_ENV", "production");
        map.insert("TRENDLENS_LOG_LEVEL", "debug");
        map.insert("TRENDLENS_TAXONOMY_PATH", "./config/taxonomy.yaml");
        map.insert("TRENDLENS_MAX_BATCH_SIZE", "200");
        map.insert("TRENDLENS_KEYWORD_MIN_RECORDS", "3");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(
            cfg.taxonomy_path.as_deref(),
            Some(std::path::Path::new("./config/taxonomy.yaml"))
        );
        assert_eq!(cfg.max_batch_size, 200);
        assert_eq!(cfg.keyword_min_records, 3);
    }

    #[test]
    fn build_app_config_blank_taxonomy_path_is_none() {
        let mut map = HashMap::new();
        map.insert("TRENDLENS_TAXONOMY_PATH", "  ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.taxonomy_path.is_none());
    }

    #[test]
    fn build_app_config_rejects_invalid_batch_size() {
        let mut map = HashMap::new();
        map.insert("TRENDLENS_MAX_BATCH_SIZE", "lots");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(
                result,
                Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDLENS_MAX_BATCH_SIZE"
            ),
            "expected InvalidEnvVar(TRENDLENS_MAX_BATCH_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_batch_size() {
        let mut map = HashMap::new();
        map.insert("TRENDLENS_MAX_BATCH_SIZE", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(
                result,
                Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDLENS_MAX_BATCH_SIZE"
            ),
            "expected InvalidEnvVar(TRENDLENS_MAX_BATCH_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_invalid_keyword_threshold() {
        let mut map = HashMap::new();
        map.insert("TRENDLENS_KEYWORD_MIN_RECORDS", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(
                result,
                Err(ConfigError::InvalidEnvVar { ref var, .. })
                    if var == "TRENDLENS_KEYWORD_MIN_RECORDS"
            ),
            "expected InvalidEnvVar(TRENDLENS_KEYWORD_MIN_RECORDS), got: {result:?}"
        );
    }
}
