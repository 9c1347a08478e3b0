//! API client module for the Engage platform.
//!
//! Provides the HTTP client with credential injection and envelope
//! unwrapping, per-endpoint wrapper functions, and request/response
//! types matching the Engage backend API.

pub mod activities;
pub mod admin;
pub mod auth;
pub mod client;
pub mod error;
pub mod recommendations;
pub mod redirect;
pub mod rewards;
pub mod types;
pub mod users;

pub use client::{ApiClient, ApiOptions};
pub use error::ApiError;
