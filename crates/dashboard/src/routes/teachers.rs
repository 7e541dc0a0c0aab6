//! Teacher management (admin only).
//!
//! Courses reference teachers by name string, not by id, so renaming or
//! deleting a teacher leaves existing course coordinator text untouched.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use syllabus_core::{Record, TeacherRecord};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::state::AppState;

/// One teacher row for the management table.
struct TeacherRow {
    id: String,
    full_name: String,
}

impl From<&TeacherRecord> for TeacherRow {
    fn from(teacher: &TeacherRecord) -> Self {
        Self {
            id: teacher
                .backend_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            full_name: teacher.full_name.clone(),
        }
    }
}

/// Teacher management page template.
#[derive(Template)]
#[template(path = "teachers/index.html")]
struct TeachersIndexTemplate {
    system_title: String,
    institution_name: String,
    user: CurrentUser,
    current_path: String,
    notice: String,
    rows: Vec<TeacherRow>,
}

/// Build the teachers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/teachers", get(index).post(create))
        .route("/teachers/{id}/delete", post(delete))
}

#[derive(Debug, Deserialize)]
struct NoticeQuery {
    #[serde(default)]
    notice: String,
}

#[derive(Debug, Deserialize)]
struct TeacherForm {
    full_name: String,
}

/// Teacher management page.
///
/// GET /teachers
async fn index(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.teachers().await.iter().map(TeacherRow::from).collect();

    let template = TeachersIndexTemplate {
        system_title: state.config().system_title.clone(),
        institution_name: state.config().institution_name.clone(),
        user,
        current_path: "/teachers".to_string(),
        notice: query.notice,
        rows,
    };

    Ok(Html(template.render().map_err(|e| {
        AppError::Internal(format!("template render error: {e}"))
    })?))
}

/// Create a teacher.
///
/// POST /teachers
async fn create(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<TeacherForm>,
) -> Result<Redirect, AppError> {
    let full_name = form.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(AppError::BadRequest("teacher name cannot be empty".to_string()));
    }

    let teacher = TeacherRecord {
        backend_id: None,
        full_name,
    };

    state.create_record(&Record::Teacher(teacher)).await?;
    Ok(Redirect::to("/teachers?notice=Teacher+created"))
}

/// Delete a teacher.
///
/// POST /teachers/{id}/delete
async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let teacher = state
        .teachers()
        .await
        .into_iter()
        .find(|t| t.backend_id.as_ref().is_some_and(|b| b.as_str() == id))
        .ok_or_else(|| AppError::NotFound(format!("teacher {id}")))?;

    state.delete_record(&Record::Teacher(teacher)).await?;
    Ok(Redirect::to("/teachers?notice=Teacher+deleted"))
}
