pub mod auth;
pub mod board;
pub mod characters;
pub mod context;
pub mod guard;
pub mod raids;
pub mod roster;
pub mod schedule;
pub mod session;
pub mod validate;
