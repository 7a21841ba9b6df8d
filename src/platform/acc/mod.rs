mod client;
mod mapper;

pub use client::AccPlatform;
