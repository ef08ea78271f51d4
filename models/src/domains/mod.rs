//! `SeaORM` entities, one module per table.

pub mod admins;
pub mod ban_history;
pub mod notifications;
pub mod organiser_banned_teams;
pub mod organiser_followers;
pub mod organiser_ratings;
pub mod organisers;
pub mod participations;
pub mod payments;
pub mod players;
pub mod reports;
pub mod sea_orm_active_enums;
pub mod team_join_requests;
pub mod teams;
pub mod tournament_entries;
pub mod tournaments;
