//! API module for the HTTP endpoints
//!
//! This module wires the event store, object sink, and host info provider
//! into an axum router.

pub mod http;
pub mod rest;
pub mod state;
