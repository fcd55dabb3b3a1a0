pub mod api;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod errors;
pub mod generator;
pub mod notify;
pub mod session;
pub mod vault;

#[cfg(feature = "keyring-store")]
pub mod keyring;
