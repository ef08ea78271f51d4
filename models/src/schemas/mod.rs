pub mod analytics;
pub mod auth;
pub mod moderation;
pub mod organiser;
pub mod pagination;
pub mod payment;
pub mod player;
pub mod team;
pub mod tournament;
