pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod platform;
pub mod server;
pub mod shutdown;
pub mod workflow;
