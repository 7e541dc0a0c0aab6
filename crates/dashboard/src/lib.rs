//! Syllabus Tracker dashboard library.
//!
//! This crate provides the dashboard as a library so the store and state
//! contracts can be exercised from integration tests, and so an embedding
//! host can supply its own [`store::BridgeHost`] transport instead of the
//! HTTP default.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
