//! Authentication route handlers.
//!
//! Login matches email and password against the cached `user` records;
//! inactive accounts cannot log in. Anyone may continue as a read-only
//! guest. Behavioral parity note: the remote store keeps passwords in the
//! clear, so comparison is plain equality - a flagged weakness of the
//! system, not a pattern to copy.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
struct LoginPageTemplate {
    system_title: String,
    institution_name: String,
    /// Empty when there is nothing to report.
    error: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/guest", post(login_as_guest))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize)]
struct LoginPageQuery {
    #[serde(default)]
    error: String,
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

/// Render the login page.
///
/// GET /auth/login
async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginPageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let error = match query.error.as_str() {
        "invalid" => "Wrong email or password, or the account is disabled.".to_string(),
        _ => String::new(),
    };

    let template = LoginPageTemplate {
        system_title: state.config().system_title.clone(),
        institution_name: state.config().institution_name.clone(),
        error,
    };

    Ok(Html(template.render().map_err(|e| {
        AppError::Internal(format!("template render error: {e}"))
    })?))
}

/// Check credentials against the user records and start a session.
///
/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    let users = state.users().await;
    let matched = users.iter().find(|u| {
        u.email.as_str() == form.email && u.password == form.password && u.active.is_true()
    });

    match matched {
        Some(user) => {
            let current = CurrentUser::from(user);
            if set_current_user(&session, &current).await.is_err() {
                return Redirect::to("/auth/login?error=invalid");
            }
            tracing::info!(email = %form.email, "User logged in");
            Redirect::to("/")
        }
        None => {
            tracing::info!(email = %form.email, "Login rejected");
            Redirect::to("/auth/login?error=invalid")
        }
    }
}

/// Start an anonymous read-only session.
///
/// POST /auth/guest
async fn login_as_guest(session: Session) -> impl IntoResponse {
    let _ = set_current_user(&session, &CurrentUser::guest()).await;
    Redirect::to("/")
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    let _ = clear_current_user(&session).await;
    Redirect::to("/auth/login")
}
