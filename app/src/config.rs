use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{ops::Deref, str::FromStr, sync::Arc, time::Duration};
use thiserror::Error;

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(1800);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Environment variable {name} has an invalid value '{value}'")]
    InvalidEnvVar { name: String, value: String },
}

/// Credentials of the admin account created at startup, if configured.
#[derive(Clone, Debug)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct ConfigInner {
    pub db_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
    pub encoding_key: EncodingKey,
    pub decoding_key: DecodingKey,
    pub redis_url: Option<String>,
    pub stripe_secret_key: Option<String>,
    pub payment_currency: String,
    /// Price of creating a team, in the currency's minor unit. `None` disables the payment gate.
    pub team_creation_fee: Option<i64>,
    pub bcrypt_cost: u32,
    pub cache_ttl: Duration,
    pub secure_cookies: bool,
    pub admin_seed: Option<AdminSeed>,
}

impl ConfigInner {
    /// Defaults suitable for local runs and tests.
    pub fn new(db_url: impl Into<String>, jwt_secret: &str) -> Self {
        Self {
            db_url: db_url.into(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origin: "http://localhost:3000".to_string(),
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            redis_url: None,
            stripe_secret_key: None,
            payment_currency: "usd".to_string(),
            team_creation_fee: None,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cache_ttl: DEFAULT_CACHE_TTL,
            secure_cookies: false,
            admin_seed: None,
        }
    }
}

#[derive(Clone)]
pub struct Config(Arc<ConfigInner>);

impl Config {
    pub fn new(inner: ConfigInner) -> Self {
        Self(Arc::new(inner))
    }

    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenvy::dotenv().ok();

        let mut v = ConfigInner::new(required("DATABASE_URL")?, &required("JWT_SECRET_KEY")?);

        v.host = required("HOST")?;
        v.port = parse_required("PORT")?;
        v.allowed_origin = required("ALLOWED_ORIGIN")?;
        v.redis_url = optional("REDIS_URL");
        v.stripe_secret_key = optional("STRIPE_SECRET_KEY");
        if let Some(currency) = optional("PAYMENT_CURRENCY") {
            v.payment_currency = currency.to_lowercase();
        }
        v.team_creation_fee = parse_optional("TEAM_CREATION_FEE")?;
        if let Some(cost) = parse_optional("BCRYPT_COST")? {
            v.bcrypt_cost = cost;
        }
        if let Some(secs) = parse_optional("CACHE_TTL_SECS")? {
            v.cache_ttl = Duration::from_secs(secs);
        }
        v.secure_cookies = parse_optional("SECURE_COOKIES")?.unwrap_or(false);
        v.admin_seed = match (
            optional("ADMIN_USERNAME"),
            optional("ADMIN_EMAIL"),
            optional("ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(email), Some(password)) => Some(AdminSeed {
                username,
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self::new(v))
    }

    pub fn get_server_url(&self) -> String {
        format!("{}:{}", self.0.host, self.0.port)
    }
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_value<T: FromStr>(name: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}

fn parse_required<T: FromStr>(name: &str) -> Result<T, ConfigError> {
    parse_value(name, required(name)?)
}

fn parse_optional<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    optional(name).map(|v| parse_value(name, v)).transpose()
}
