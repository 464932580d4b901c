pub mod chars;
pub mod config;
pub mod init;
pub mod login;
pub mod prompt;
pub mod raids;
pub mod status;
pub mod window;
