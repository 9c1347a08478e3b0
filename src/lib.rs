//! Client library for the Engage activity recommendation platform.
//!
//! Covers the authenticated request pipeline against the Engage backend
//! plus the durable session state and guarded client-side navigation
//! that the pipeline keeps in sync.

pub mod api;
pub mod config;
pub mod notify;
pub mod router;
pub mod session;
pub mod state;
pub mod storage;
