//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (probes the remote store)
//!
//! # Dashboard
//! GET  /                       - Submission status overview (filter + pagination)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Email/password login
//! POST /auth/guest             - Start a read-only guest session
//! POST /auth/logout            - Logout
//!
//! # Courses (admin only)
//! GET  /courses                - List + create form
//! POST /courses                - Create course
//! GET  /courses/{id}/edit      - Edit form
//! POST /courses/{id}           - Update course
//! POST /courses/{id}/status    - Toggle one sign-off / the scanned flag
//! POST /courses/{id}/delete    - Delete course
//!
//! # Users (admin only)
//! GET  /users                  - List + create form
//! POST /users                  - Create user
//! POST /users/{id}/toggle      - Flip the active flag
//! POST /users/{id}/delete      - Delete user
//!
//! # Teachers (admin only)
//! GET  /teachers               - List + create form
//! POST /teachers               - Create teacher
//! POST /teachers/{id}/delete   - Delete teacher
//! ```

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod teachers;
pub mod users;

/// Build the application router (health endpoints are added in `main`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::router())
        .merge(auth::router())
        .merge(courses::router())
        .merge(users::router())
        .merge(teachers::router())
}
