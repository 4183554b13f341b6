use crate::{Identity, Role};

use proptest::prelude::*;

fn login_identity() -> Identity {
    Identity::new("jane@example.com", "Student")
        .with_names("Jane", "Public")
        .with_avatar("https://cdn.example.com/jane.png")
}

#[test]
fn given_role_with_case_and_spaces_when_new_then_normalized() {
    let identity = Identity::new("a@b.c", "  Instructor ");
    assert_eq!(identity.role, "instructor");
    assert_eq!(identity.role_kind(), Role::Instructor);
}

#[test]
fn given_multi_word_name_when_split_then_rest_goes_to_last_name() {
    let (first, last) = Identity::split_display_name("Jane Q Public");
    assert_eq!(first, "Jane");
    assert_eq!(last, "Q Public");
}

#[test]
fn given_single_word_name_when_split_then_last_name_empty() {
    let (first, last) = Identity::split_display_name("  Cher ");
    assert_eq!(first, "Cher");
    assert_eq!(last, "");
}

#[test]
fn given_names_when_display_name_then_joined_and_trimmed() {
    assert_eq!(login_identity().display_name(), "Jane Public");
    assert_eq!(Identity::new("a@b.c", "").display_name(), "");
}

#[test]
fn given_lean_identity_when_merge_missing_then_keeps_known_fields() {
    let mut lean = Identity::new("jane@example.com", "student");
    lean.merge_missing(&login_identity());

    assert_eq!(lean.first_name, "Jane");
    assert_eq!(lean.last_name, "Public");
    assert_eq!(lean.avatar_url, "https://cdn.example.com/jane.png");
}

#[test]
fn given_rich_identity_when_merge_missing_then_never_overwritten() {
    let mut rich = login_identity();
    let other = Identity::new("other@example.com", "admin").with_names("X", "Y");
    rich.merge_missing(&other);

    assert_eq!(rich, login_identity());
}

#[test]
fn given_different_account_when_merged_with_known_then_nothing_inherited() {
    let fresh = Identity::new("bob@example.com", "student");
    let merged = fresh.clone().merged_with_known(Some(&login_identity()));
    assert_eq!(merged, fresh);
}

#[test]
fn given_empty_identity_when_is_recognizable_then_false() {
    assert!(!Identity::default().is_recognizable());
    assert!(Identity::new("", "student").is_recognizable());
    assert!(Identity::new("a@b.c", "").is_recognizable());
}

#[test]
fn given_unknown_role_without_email_when_is_recognizable_then_false() {
    assert!(!Identity::new("", "error").is_recognizable());
    assert!(Identity::new("a@b.c", "janitor").is_recognizable());
}

#[test]
fn given_identity_when_serialized_then_uses_camel_case_keys() {
    let json = serde_json::to_string(&login_identity()).unwrap();
    assert!(json.contains("\"firstName\":\"Jane\""));
    assert!(json.contains("\"avatarUrl\""));
}

proptest! {
    #[test]
    fn given_two_words_when_split_and_joined_then_round_trips(
        first in "[A-Za-z]{1,12}",
        last in "[A-Za-z]{1,12}( [A-Za-z]{1,12})?",
    ) {
        let identity = Identity::from_display_name("e@x.io", "student", &format!("{first} {last}"));
        prop_assert_eq!(&identity.first_name, &first);
        prop_assert_eq!(&identity.last_name, &last);
        prop_assert_eq!(identity.display_name(), format!("{first} {last}"));
    }
}
