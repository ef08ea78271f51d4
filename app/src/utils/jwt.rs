use chrono::Utc;
use jsonwebtoken::{Header, Validation, decode, encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::config::Config;

pub const JWT_EXPIRATION_DURATION: Duration = Duration::from_secs(60 * 60 * 24); // 24 hours

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims<T> {
    pub exp: i64,
    pub data: T,
}

pub fn encode_data<T: Serialize>(config: &Config, data: T) -> Result<String, anyhow::Error> {
    let exp = (Utc::now() + JWT_EXPIRATION_DURATION).timestamp();

    let claims = Claims { exp, data };
    encode(&Header::default(), &claims, &config.encoding_key)
        .map_err(|e| anyhow::anyhow!("Failed to encode token: {}", e))
}

pub fn decode_data<T: DeserializeOwned>(config: &Config, token: &str) -> Result<T, anyhow::Error> {
    let token_data = decode::<Claims<T>>(token, &config.decoding_key, &Validation::default())
        .map_err(|e| anyhow::anyhow!("Failed to decode token: {}", e))?;
    Ok(token_data.claims.data)
}

#[cfg(test)]
mod tests {
    use models::schemas::auth::{Role, TokenSubject};

    use super::*;
    use crate::config::ConfigInner;

    #[test]
    fn subject_survives_round_trip() {
        let config = Config::new(ConfigInner::new("sqlite::memory:", "secret"));
        let token = encode_data(
            &config,
            TokenSubject {
                id: "p1".into(),
                role: Role::Organiser,
            },
        )
        .unwrap();

        let subject: TokenSubject = decode_data(&config, &token).unwrap();
        assert_eq!(subject.id, "p1");
        assert_eq!(subject.role, Role::Organiser);
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let issuer = Config::new(ConfigInner::new("sqlite::memory:", "secret"));
        let other = Config::new(ConfigInner::new("sqlite::memory:", "another"));
        let token = encode_data(&issuer, "payload").unwrap();

        assert!(decode_data::<String>(&other, &token).is_err());
    }
}
