//! User account management (admin only).

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use syllabus_core::{Email, Record, Role, StringFlag, UserRecord};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::state::AppState;

/// One user row for the management table.
struct UserRow {
    id: String,
    email: String,
    full_name: String,
    position: String,
    active: bool,
}

impl From<&UserRecord> for UserRow {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user
                .backend_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            email: user.email.to_string(),
            full_name: user.full_name.clone(),
            position: user.position.to_string(),
            active: user.active.is_true(),
        }
    }
}

/// User management page template.
#[derive(Template)]
#[template(path = "users/index.html")]
struct UsersIndexTemplate {
    system_title: String,
    institution_name: String,
    user: CurrentUser,
    current_path: String,
    notice: String,
    rows: Vec<UserRow>,
}

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(index).post(create))
        .route("/users/{id}/toggle", post(toggle_active))
        .route("/users/{id}/delete", post(delete))
}

#[derive(Debug, Deserialize)]
struct NoticeQuery {
    #[serde(default)]
    notice: String,
}

#[derive(Debug, Deserialize)]
struct UserForm {
    email: String,
    password: String,
    full_name: String,
    position: String,
}

/// Look up a user by backend id in the current cache.
async fn find_user(state: &AppState, id: &str) -> Result<UserRecord, AppError> {
    state
        .users()
        .await
        .into_iter()
        .find(|u| u.backend_id.as_ref().is_some_and(|b| b.as_str() == id))
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))
}

/// User management page.
///
/// GET /users
async fn index(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.users().await.iter().map(UserRow::from).collect();

    let template = UsersIndexTemplate {
        system_title: state.config().system_title.clone(),
        institution_name: state.config().institution_name.clone(),
        user,
        current_path: "/users".to_string(),
        notice: query.notice,
        rows,
    };

    Ok(Html(template.render().map_err(|e| {
        AppError::Internal(format!("template render error: {e}"))
    })?))
}

/// Create a user account. New accounts start active.
///
/// POST /users
async fn create(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<UserForm>,
) -> Result<Redirect, AppError> {
    let email = Email::parse(&form.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
    let position = match form.position.as_str() {
        "admin" => Role::Admin,
        "user" => Role::User,
        other => {
            return Err(AppError::BadRequest(format!("unknown position: {other}")));
        }
    };

    let user = UserRecord {
        backend_id: None,
        email,
        password: form.password,
        full_name: form.full_name,
        position,
        active: StringFlag::new(true),
    };

    state.create_record(&Record::User(user)).await?;
    Ok(Redirect::to("/users?notice=User+created"))
}

/// Flip an account's active flag.
///
/// POST /users/{id}/toggle
async fn toggle_active(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let mut user = find_user(&state, &id).await?;
    user.active = user.active.toggled();

    state.update_record(&Record::User(user)).await?;
    Ok(Redirect::to("/users?notice=User+updated"))
}

/// Delete a user account.
///
/// POST /users/{id}/delete
async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let user = find_user(&state, &id).await?;
    state.delete_record(&Record::User(user)).await?;
    Ok(Redirect::to("/users?notice=User+deleted"))
}
