//! API Layer
//!
//! Typed client for the Threadwatch REST endpoints.

pub mod client;

pub use client::FetchError;
