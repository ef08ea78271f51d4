pub mod auth;
pub mod identify;
pub mod rate_limit;
