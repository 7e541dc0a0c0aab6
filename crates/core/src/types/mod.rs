//! Core type definitions.

mod email;
mod id;
mod page;
mod record;
mod status;

pub use email::{Email, EmailError};
pub use id::BackendId;
pub use page::{PAGE_SIZE, Page};
pub use record::{
    CourseRecord, EntityType, Record, Role, Semester, StringFlag, TeacherRecord, UserRecord,
};
pub use status::StatusField;
