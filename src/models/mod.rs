pub mod auth;
pub mod character;
pub mod raid;
pub mod signup;

pub use auth::{LoginRequest, LoginResponse};
pub use character::{Character, CharacterForm};
pub use raid::{CreateRaidRequest, RaidEvent};
pub use signup::{SignupRecord, SignupRequest};
