pub mod auth;
pub mod moderation;
pub mod organiser;
pub mod payment;
pub mod player;
pub mod team;
pub mod tournament;
