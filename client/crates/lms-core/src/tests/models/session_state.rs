use crate::{Identity, SessionState};

#[test]
fn test_anonymous_state_has_no_identity() {
    let state = SessionState::anonymous();
    assert!(!state.authenticated);
    assert!(state.identity.is_none());
    assert!(state.role().is_none());
}

#[test]
fn test_authenticated_state_carries_identity() {
    let state = SessionState::authenticated(Identity::new("a@b.c", "admin"));
    assert!(state.authenticated);
    assert_eq!(state.role(), Some("admin"));
}

#[test]
fn test_unconfirmed_state_is_not_authenticated() {
    let state = SessionState::unconfirmed(Identity::new("a@b.c", ""));
    assert!(!state.authenticated);
    assert!(state.identity.is_some());
    assert!(state.role().is_none());
}
