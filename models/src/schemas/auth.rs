use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Player,
    Organiser,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Player => write!(f, "player"),
            Role::Organiser => write!(f, "organiser"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Data carried inside an issued token.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TokenSubject {
    pub id: String,
    pub role: Role,
}

/// The authenticated caller. Resolved once per request from the token and the
/// current database row, so `banned` reflects bans issued after login.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Principal {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub banned: bool,
}

#[derive(Clone, Debug, Default)]
pub struct AuthSchema {
    pub principal: Option<Principal>,
}

#[derive(Serialize, Clone, Debug)]
pub struct LoginSchema {
    pub principal: Principal,
    pub token: String,
}
