use std::env;

use thiserror::Error;

/// Development-only fallback for `JWT_SECRET`. Tokens signed with this value
/// are forgeable by anyone who has read the source, so startup refuses it in
/// production.
pub const DEV_FALLBACK_SECRET: &str = "your-secret-key";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
    pub status_policy: AuthStatusPolicy,
}

/// Status code answered when a presented token fails verification.
///
/// The deployed behavior was asymmetric: a missing token answers 401 while a
/// present-but-rejected token answers 403. Most systems answer 401 for both
/// and reserve 403 for authorization failures, so the choice is kept as a
/// named policy rather than an accident. Missing tokens answer 401 under
/// either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatusPolicy {
    #[default]
    LegacyAsymmetric,
    Uniform401,
}

impl AuthStatusPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "legacy-asymmetric" => Some(Self::LegacyAsymmetric),
            "uniform-401" => Some(Self::Uniform401),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("refusing to start: JWT_SECRET is the development fallback and APP_ENV is production")]
    DefaultSecretInProduction,

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let port = match env::var("PORT") {
            Ok(v) => v.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: v,
            })?,
            Err(_) => 3000,
        };

        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(v) => v.parse::<u32>().map_err(|_| ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: v,
            })?,
            Err(_) => 10,
        };

        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| DEV_FALLBACK_SECRET.to_string());

        let status_policy = match env::var("AUTH_STATUS_POLICY") {
            Ok(v) => AuthStatusPolicy::parse(&v).ok_or(ConfigError::Invalid {
                name: "AUTH_STATUS_POLICY",
                value: v,
            })?,
            Err(_) => AuthStatusPolicy::default(),
        };

        let config = Self {
            environment,
            server: ServerConfig { port },
            database: DatabaseConfig {
                url,
                max_connections,
            },
            security: SecurityConfig {
                jwt_secret,
                token_ttl_secs: 3600,
                bcrypt_cost: 10,
                status_policy,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment == Environment::Production
            && self.security.jwt_secret == DEV_FALLBACK_SECRET
        {
            return Err(ConfigError::DefaultSecretInProduction);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(environment: Environment, secret: &str) -> AppConfig {
        AppConfig {
            environment,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "postgres://localhost/marginalia".to_string(),
                max_connections: 10,
            },
            security: SecurityConfig {
                jwt_secret: secret.to_string(),
                token_ttl_secs: 3600,
                bcrypt_cost: 10,
                status_policy: AuthStatusPolicy::default(),
            },
        }
    }

    #[test]
    fn default_secret_rejected_in_production() {
        let config = config_with(Environment::Production, DEV_FALLBACK_SECRET);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DefaultSecretInProduction)
        ));
    }

    #[test]
    fn default_secret_tolerated_in_development() {
        let config = config_with(Environment::Development, DEV_FALLBACK_SECRET);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn real_secret_accepted_in_production() {
        let config = config_with(Environment::Production, "9f2c1a-long-deploy-secret");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn status_policy_parses_known_names_only() {
        assert_eq!(
            AuthStatusPolicy::parse("legacy-asymmetric"),
            Some(AuthStatusPolicy::LegacyAsymmetric)
        );
        assert_eq!(
            AuthStatusPolicy::parse("uniform-401"),
            Some(AuthStatusPolicy::Uniform401)
        );
        assert_eq!(AuthStatusPolicy::parse("403"), None);
    }
}
