//! The logged-in identity carried in the session cookie.

use serde::{Deserialize, Serialize};
use syllabus_core::{Role, UserRecord};

/// Session keys used across handlers.
pub mod session_keys {
    /// Key under which the current user is stored in the session.
    pub const CURRENT_USER: &str = "current_user";
}

/// The identity attached to a session.
///
/// Either a real account from the user records, or an anonymous guest who
/// may browse the dashboard read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentUser {
    pub email: Option<String>,
    pub full_name: String,
    pub role: Option<Role>,
}

impl CurrentUser {
    /// A guest session: no account, no role, read-only access.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            email: None,
            full_name: "Guest".to_string(),
            role: None,
        }
    }

    /// Whether this identity may use the CRUD screens.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_some_and(|r| r.is_admin())
    }

    /// Whether this is an anonymous guest session.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        self.role.is_none()
    }
}

impl From<&UserRecord> for CurrentUser {
    fn from(user: &UserRecord) -> Self {
        Self {
            email: Some(user.email.to_string()),
            full_name: user.full_name.clone(),
            role: Some(user.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::{Email, StringFlag};

    #[test]
    fn test_guest_has_no_privileges() {
        let guest = CurrentUser::guest();
        assert!(guest.is_guest());
        assert!(!guest.is_admin());
    }

    #[test]
    fn test_from_user_record() {
        let record = UserRecord {
            backend_id: Some("u-1".into()),
            email: Email::parse("head@school.ac.th").expect("valid email"),
            password: "pw".to_string(),
            full_name: "Head of Academics".to_string(),
            position: Role::Admin,
            active: StringFlag::new(true),
        };

        let current = CurrentUser::from(&record);
        assert!(current.is_admin());
        assert!(!current.is_guest());
        assert_eq!(current.email.as_deref(), Some("head@school.ac.th"));
    }
}
