//! Route declarations of the course administration client.

use crate::route::RouteRecord;

/// Every view the application can navigate to.
///
/// Course and student management is reserved for administrators; students
/// manage their own enrollments.
pub fn application_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::redirect("/", "/login"),
        RouteRecord::new("login", "/login"),
        RouteRecord::new("signup", "/signup"),
        RouteRecord::new("dashboard", "/dashboard").requires_auth(),
        RouteRecord::new("courses", "/courses").requires_auth(),
        RouteRecord::new("kanban", "/kanban").requires_auth(),
        RouteRecord::new("student-enrollments", "/my-courses").requires_auth(),
        RouteRecord::new("create-and-enroll", "/create-and-enroll").requires_auth(),
        RouteRecord::new("edit-enrollment", "/edit-enrollment/:id").requires_auth(),
        RouteRecord::new("students", "/students").requires_admin(),
        RouteRecord::new("create-course", "/create-course").requires_admin(),
        RouteRecord::new("edit-course", "/edit-course/:id").requires_admin(),
        RouteRecord::new("edit-student", "/edit-student/:id").requires_admin(),
        RouteRecord::new("show-student", "/show-student/:id").requires_admin(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{RouteRequirement, RouteTable};

    #[test]
    fn application_routes_are_valid() {
        let table = RouteTable::new(application_routes()).unwrap();
        assert_eq!(table.len(), 14);
        assert!(table.records().all(|r| r.requirement.is_consistent()));
    }

    #[test]
    fn management_views_require_admin() {
        let table = RouteTable::new(application_routes()).unwrap();
        for name in ["students", "create-course", "edit-course", "edit-student", "show-student"] {
            let record = table.by_name(name).unwrap();
            assert_eq!(record.requirement, RouteRequirement::ADMIN, "{name}");
        }
        assert_eq!(
            table.by_name("student-enrollments").unwrap().requirement,
            RouteRequirement::AUTHENTICATED
        );
        assert_eq!(table.by_name("signup").unwrap().requirement, RouteRequirement::PUBLIC);
    }
}
