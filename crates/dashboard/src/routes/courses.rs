//! Course management (admin only).
//!
//! Every mutation follows the same contract: merge the form fields into
//! the FULL existing record, send it whole, and let the state layer
//! reload the cache before the redirect lands back on a fresh page.
//! Partial objects are never sent - the store replaces records wholesale.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use syllabus_core::{CourseRecord, Record, Semester, StatusField, StringFlag};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::state::AppState;

/// One course row for the management table.
struct CourseRow {
    id: String,
    course_name: String,
    academic_year: String,
    year_level: u8,
    semester: String,
    due_date: String,
    status_academic: String,
    status_homeroom: String,
    status_director: String,
    scanned: bool,
}

impl From<&CourseRecord> for CourseRow {
    fn from(course: &CourseRecord) -> Self {
        Self {
            id: course
                .backend_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            course_name: course.course_name.clone(),
            academic_year: course.academic_year.clone(),
            year_level: course.year_level,
            semester: course.semester.to_string(),
            due_date: course
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            status_academic: course.status_academic.to_string(),
            status_homeroom: course.status_homeroom.to_string(),
            status_director: course.status_director.to_string(),
            scanned: course.scanned.is_true(),
        }
    }
}

/// Course management page template.
#[derive(Template)]
#[template(path = "courses/index.html")]
struct CoursesIndexTemplate {
    system_title: String,
    institution_name: String,
    user: CurrentUser,
    current_path: String,
    notice: String,
    teacher_names: Vec<String>,
    rows: Vec<CourseRow>,
}

/// One year-level option for the edit form's dropdown.
struct LevelOption {
    value: u8,
    selected: bool,
}

/// Course edit page template.
#[derive(Template)]
#[template(path = "courses/edit.html")]
struct CourseEditTemplate {
    system_title: String,
    institution_name: String,
    user: CurrentUser,
    current_path: String,
    id: String,
    course_name: String,
    coordinators: String,
    year_levels: Vec<LevelOption>,
    room: String,
    semester: String,
    academic_year: String,
    due_date: String,
    pdf_url: String,
}

/// Build the courses router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(index).post(create))
        .route("/courses/{id}", post(update))
        .route("/courses/{id}/edit", get(edit))
        .route("/courses/{id}/status", post(set_status))
        .route("/courses/{id}/delete", post(delete))
}

#[derive(Debug, Deserialize)]
struct NoticeQuery {
    #[serde(default)]
    notice: String,
}

/// Fields shared by the create and edit forms.
#[derive(Debug, Deserialize)]
struct CourseForm {
    course_name: String,
    #[serde(default)]
    coordinators: String,
    year_level: u8,
    #[serde(default)]
    room: String,
    semester: String,
    academic_year: String,
    #[serde(default)]
    due_date: String,
    #[serde(default)]
    pdf_url: String,
}

impl CourseForm {
    fn semester(&self) -> Result<Semester, AppError> {
        Semester::parse(&self.semester)
            .ok_or_else(|| AppError::BadRequest(format!("unknown semester: {}", self.semester)))
    }

    fn due_date(&self) -> Result<Option<NaiveDate>, AppError> {
        let trimmed = self.due_date.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("invalid due date: {trimmed}")))
    }

    fn validate_year_level(&self) -> Result<u8, AppError> {
        if (1..=6).contains(&self.year_level) {
            Ok(self.year_level)
        } else {
            Err(AppError::BadRequest(format!(
                "year level must be 1-6, got {}",
                self.year_level
            )))
        }
    }
}

/// Look up a course by its backend id in the current cache.
async fn find_course(state: &AppState, id: &str) -> Result<CourseRecord, AppError> {
    state
        .courses()
        .await
        .into_iter()
        .find(|c| c.backend_id.as_ref().is_some_and(|b| b.as_str() == id))
        .ok_or_else(|| AppError::NotFound(format!("course {id}")))
}

/// Course management page.
///
/// GET /courses
async fn index(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.courses().await.iter().map(CourseRow::from).collect();
    let teacher_names = state
        .teachers()
        .await
        .into_iter()
        .map(|t| t.full_name)
        .collect();

    let template = CoursesIndexTemplate {
        system_title: state.config().system_title.clone(),
        institution_name: state.config().institution_name.clone(),
        user,
        current_path: "/courses".to_string(),
        notice: query.notice,
        teacher_names,
        rows,
    };

    Ok(Html(template.render().map_err(|e| {
        AppError::Internal(format!("template render error: {e}"))
    })?))
}

/// Create a course.
///
/// POST /courses
async fn create(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<CourseForm>,
) -> Result<Redirect, AppError> {
    let course = CourseRecord {
        backend_id: None,
        course_name: form.course_name.clone(),
        coordinators: form.coordinators.clone(),
        year_level: form.validate_year_level()?,
        room: form.room.clone(),
        semester: form.semester()?,
        academic_year: form.academic_year.clone(),
        due_date: form.due_date()?,
        status_academic: StatusField::unset(),
        status_homeroom: StatusField::unset(),
        status_director: StatusField::unset(),
        scanned: StringFlag::default(),
        pdf_url: form.pdf_url.clone(),
    };

    state.create_record(&Record::Course(course)).await?;
    Ok(Redirect::to("/courses?notice=Course+created"))
}

/// Course edit page.
///
/// GET /courses/{id}/edit
async fn edit(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let course = find_course(&state, &id).await?;

    let template = CourseEditTemplate {
        system_title: state.config().system_title.clone(),
        institution_name: state.config().institution_name.clone(),
        user,
        current_path: "/courses".to_string(),
        id,
        course_name: course.course_name,
        coordinators: course.coordinators,
        year_levels: (1..=6)
            .map(|value| LevelOption {
                value,
                selected: value == course.year_level,
            })
            .collect(),
        room: course.room,
        semester: course.semester.to_string(),
        academic_year: course.academic_year,
        due_date: course
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        pdf_url: course.pdf_url,
    };

    Ok(Html(template.render().map_err(|e| {
        AppError::Internal(format!("template render error: {e}"))
    })?))
}

/// Update a course from the edit form.
///
/// POST /courses/{id}
///
/// Form fields are merged into the existing record; sign-off statuses and
/// the scanned flag are untouched here (they have their own endpoint).
async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CourseForm>,
) -> Result<Redirect, AppError> {
    let mut course = find_course(&state, &id).await?;

    course.course_name = form.course_name.clone();
    course.coordinators = form.coordinators.clone();
    course.year_level = form.validate_year_level()?;
    course.room = form.room.clone();
    course.semester = form.semester()?;
    course.academic_year = form.academic_year.clone();
    course.due_date = form.due_date()?;
    course.pdf_url = form.pdf_url.clone();

    state.update_record(&Record::Course(course)).await?;
    Ok(Redirect::to("/courses?notice=Course+saved"))
}

#[derive(Debug, Deserialize)]
struct StatusForm {
    field: String,
    /// Present ("on") when the checkbox is checked.
    #[serde(default)]
    done: Option<String>,
}

/// Toggle one sign-off status or the scanned flag.
///
/// POST /courses/{id}/status
///
/// Checking a sign-off stamps today's date; unchecking clears it.
async fn set_status(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let mut course = find_course(&state, &id).await?;

    let done = form.done.is_some();
    let stamp = if done {
        StatusField::done_on(Utc::now().date_naive())
    } else {
        StatusField::unset()
    };

    match form.field.as_str() {
        "status_academic" => course.status_academic = stamp,
        "status_homeroom" => course.status_homeroom = stamp,
        "status_director" => course.status_director = stamp,
        "scanned" => course.scanned = StringFlag::new(done),
        other => {
            return Err(AppError::BadRequest(format!("unknown status field: {other}")));
        }
    }

    state.update_record(&Record::Course(course)).await?;
    Ok(Redirect::to("/courses?notice=Status+updated"))
}

/// Delete a course.
///
/// POST /courses/{id}/delete
async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let course = find_course(&state, &id).await?;
    state.delete_record(&Record::Course(course)).await?;
    Ok(Redirect::to("/courses?notice=Course+deleted"))
}
