//! Session-facing domain models.

mod current_user;

pub use current_user::{CurrentUser, session_keys};
