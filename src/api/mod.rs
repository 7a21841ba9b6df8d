pub mod auth;
pub mod extract;
pub mod handler;
pub mod payloads;
