mod common;
mod moderation;
mod payment;
mod ranking;
mod team;
mod tournament;
