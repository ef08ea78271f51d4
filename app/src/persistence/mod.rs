pub mod admins;
pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod moderation;
pub mod notifications;
pub mod organisers;
pub mod payments;
pub mod players;
pub mod teams;
pub mod tournaments;

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;

pub const ID_LENGTH: usize = 24;

pub const ID_ALPHABET: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

pub fn new_id() -> String {
    nanoid::nanoid!(ID_LENGTH, &ID_ALPHABET)
}

fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}
