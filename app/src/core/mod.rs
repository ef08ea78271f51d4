//! Pure ordering rules shared by the persistence layer.

pub mod points;
pub mod ranking;
