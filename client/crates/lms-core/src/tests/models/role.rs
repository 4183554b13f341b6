use crate::Role;

use proptest::prelude::*;

#[test]
fn test_role_parse_known_aliases() {
    assert_eq!(Role::parse("admin"), Role::Admin);
    assert_eq!(Role::parse("Administrator"), Role::Admin);
    assert_eq!(Role::parse("super_admin"), Role::Admin);
    assert_eq!(Role::parse(" INSTRUCTOR "), Role::Instructor);
    assert_eq!(Role::parse("teacher"), Role::Instructor);
    assert_eq!(Role::parse("student"), Role::Student);
    assert_eq!(Role::parse("learner"), Role::Student);
}

#[test]
fn test_role_parse_unknown_and_empty() {
    assert_eq!(Role::parse(""), Role::Unrecognized);
    assert_eq!(Role::parse("bogus"), Role::Unrecognized);
    assert!(!Role::Unrecognized.is_recognized());
}

proptest! {
    #[test]
    fn given_any_string_when_parsed_then_never_panics(role in ".*") {
        let parsed = Role::parse(&role);
        prop_assert!(parsed.is_recognized() || parsed == Role::Unrecognized);
    }
}
