//! Dashboard overview: per-year stats and the paginated course table.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Deserialize;
use syllabus_core::{CourseRecord, Page};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Year filter value meaning "no filter".
const ALL_YEARS: &str = "all";

/// One course row, preformatted for the table.
struct CourseRow {
    course_name: String,
    year_level: u8,
    room: String,
    semester: String,
    coordinators: String,
    due_date: String,
    status_academic: String,
    status_homeroom: String,
    status_director: String,
    scanned: bool,
    pdf_url: String,
    overdue: bool,
}

impl From<&CourseRecord> for CourseRow {
    fn from(course: &CourseRecord) -> Self {
        Self {
            course_name: course.course_name.clone(),
            year_level: course.year_level,
            room: course.room.clone(),
            semester: course.semester.to_string(),
            coordinators: course.coordinators.clone(),
            due_date: course
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            status_academic: course.status_academic.to_string(),
            status_homeroom: course.status_homeroom.to_string(),
            status_director: course.status_director.to_string(),
            scanned: course.scanned.is_true(),
            pdf_url: course.pdf_url.clone(),
            overdue: course.is_overdue(),
        }
    }
}

/// Aggregate counts over the filtered course set.
struct Stats {
    total: usize,
    fully_signed: usize,
    pending: usize,
    overdue: usize,
}

impl Stats {
    fn compute(courses: &[CourseRecord]) -> Self {
        let fully_signed = courses.iter().filter(|c| c.is_fully_signed()).count();
        Self {
            total: courses.len(),
            fully_signed,
            pending: courses.len() - fully_signed,
            overdue: courses.iter().filter(|c| c.is_overdue()).count(),
        }
    }
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    system_title: String,
    institution_name: String,
    user: CurrentUser,
    current_path: String,
    years: Vec<String>,
    year: String,
    stats: Stats,
    rows: Vec<CourseRow>,
    page: usize,
    total_pages: usize,
    has_prev: bool,
    has_next: bool,
    prev_page: usize,
    next_page: usize,
    back10: usize,
    fwd10: usize,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    year: Option<String>,
    page: Option<usize>,
}

/// Dashboard overview page.
///
/// GET /?year=<academic year|all>&page=<n>
async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let courses = state.courses().await;

    // Distinct academic years, newest first, for the filter dropdown.
    let mut years: Vec<String> = courses.iter().map(|c| c.academic_year.clone()).collect();
    years.sort_unstable();
    years.dedup();
    years.reverse();

    let year = query.year.unwrap_or_else(|| ALL_YEARS.to_string());
    let filtered: Vec<CourseRecord> = courses
        .into_iter()
        .filter(|c| year == ALL_YEARS || c.academic_year == year)
        .collect();

    let stats = Stats::compute(&filtered);

    let page = Page::resume(filtered.len(), query.page.unwrap_or(1));
    let rows = page.slice(&filtered).iter().map(CourseRow::from).collect();

    let mut back10 = page;
    back10.step(-10);
    let mut fwd10 = page;
    fwd10.step(10);

    let template = DashboardTemplate {
        system_title: state.config().system_title.clone(),
        institution_name: state.config().institution_name.clone(),
        user,
        current_path: "/".to_string(),
        years,
        year,
        stats,
        rows,
        page: page.current(),
        total_pages: page.total_pages(),
        has_prev: page.has_prev(),
        has_next: page.has_next(),
        prev_page: page.current().saturating_sub(1).max(1),
        next_page: (page.current() + 1).min(page.total_pages()),
        back10: back10.current(),
        fwd10: fwd10.current(),
    };

    Ok(Html(template.render().map_err(|e| {
        AppError::Internal(format!("template render error: {e}"))
    })?))
}
