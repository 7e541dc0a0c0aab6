//! Syllabus Tracker Core - Shared types library.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every
//! business record lives in one flat remote store and is distinguished by
//! a `type` tag; this crate defines those records, the backend-assigned
//! identifier that keys updates and deletes, and the pure pagination and
//! overdue arithmetic the views rely on.
//!
//! # Modules
//!
//! - [`types`] - Records, backend IDs, emails, status fields, pagination

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
