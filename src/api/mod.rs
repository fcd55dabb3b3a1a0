//! API layer — transport seam, ureq transport, wire types, typed client.
//!
//! This module provides:
//! - `Transport`, `ApiRequest`, `ApiResponse` (`transport`)
//! - `HttpTransport`, the cookie-carrying ureq implementation (`http`,
//!   with its jar in `cookies`)
//! - Server JSON types (`models`)
//! - `ApiClient`, one method per endpoint (`client`)

pub mod client;
pub mod cookies;
pub mod http;
pub mod models;
pub mod transport;

// Re-export the most commonly used items.
pub use client::{extract_detail, ApiClient, UnauthorizedHook};
pub use http::HttpTransport;
pub use models::{ItemChanges, NewItem, User, VaultItem};
pub use transport::{ApiRequest, ApiResponse, Body, Method, Transport};
