use crate::{CoreError, Portal};

use std::str::FromStr;

#[test]
fn test_portal_as_str() {
    assert_eq!(Portal::Admin.as_str(), "admin");
    assert_eq!(Portal::Student.as_str(), "student");
    assert_eq!(Portal::Instructor.as_str(), "instructor");
}

#[test]
fn test_portal_from_str_is_case_insensitive() {
    assert_eq!(Portal::from_str("ADMIN").unwrap(), Portal::Admin);
    assert_eq!(Portal::from_str(" student ").unwrap(), Portal::Student);
    assert_eq!(Portal::from_str("Instructor").unwrap(), Portal::Instructor);
}

#[test]
fn test_portal_from_str_rejects_unknown() {
    let result = Portal::from_str("parent");
    assert!(matches!(result, Err(CoreError::InvalidPortal { .. })));
}

#[test]
fn test_portal_login_paths_are_distinct() {
    let paths: Vec<_> = Portal::ALL.iter().map(|p| p.default_login_path()).collect();
    assert_eq!(paths, vec!["/admin/login", "/student/login", "/instructor/login"]);
}

#[test]
fn test_portal_default() {
    assert_eq!(Portal::default(), Portal::Student);
}
