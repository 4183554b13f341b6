//! End-to-end session flows against a mock backend

mod common;

use common::{login_envelope, portal_session};

use lms_core::Portal;
use lms_session::{Credentials, Navigator};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

#[tokio::test]
async fn test_login_then_session_check_sends_session_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "jane@example.com", "password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=abc123; Path=/; HttpOnly")
                .set_body_json(login_envelope("jane@example.com", "Student")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("cookie", "sid=abc123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"user": {"email": "jane@example.com", "role": "student"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (session, _) = portal_session(&mock_server.uri(), Portal::Student, "/student/login");

    let identity = session
        .login(&Credentials::new("jane@example.com", "secret"))
        .await
        .unwrap();
    assert_eq!(identity.role, "student");
    assert_eq!(identity.avatar_url, "https://cdn.example.com/jane.png");

    assert!(session.validate(true).await);
    let identity = session.identity().unwrap();
    assert_eq!(identity.first_name, "Jane");
    assert_eq!(identity.last_name, "Q Public");
}

#[tokio::test]
async fn test_login_rejected_leaves_session_anonymous() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": "INVALID_CREDENTIALS", "message": "Email or password is wrong"}
        })))
        .mount(&mock_server)
        .await;

    let (session, navigator) =
        portal_session(&mock_server.uri(), Portal::Student, "/student/login");

    let err = session
        .login(&Credentials::new("jane@example.com", "wrong"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("INVALID_CREDENTIALS"));
    assert!(!session.state().authenticated);
    assert!(navigator.history().is_empty());
}

#[tokio::test]
async fn test_session_check_without_identity_is_invalid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (session, _) = portal_session(&mock_server.uri(), Portal::Admin, "/");

    assert!(!session.validate(false).await);
}

#[tokio::test]
async fn test_unreachable_backend_is_invalid_session() {
    let (session, _) = portal_session("http://127.0.0.1:9", Portal::Student, "/");

    assert!(!session.validate(true).await);
    assert!(session.identity().is_none());
}

#[tokio::test]
async fn test_expired_session_on_feature_call_redirects_to_login() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(login_envelope("jane@example.com", "student")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (session, navigator) =
        portal_session(&mock_server.uri(), Portal::Student, "/student/courses");
    session
        .login(&Credentials::new("jane@example.com", "secret"))
        .await
        .unwrap();

    let err = session.client().get("/api/courses").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!session.state().authenticated);
    assert_eq!(
        navigator.current_location(),
        "/student/login?returnUrl=%2Fstudent%2Fcourses&reason=session_expired"
    );
}

#[tokio::test]
async fn test_forbidden_feature_call_redirects_to_role_landing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(login_envelope("ian@example.com", "instructor")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/reports"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Admins only"
        })))
        .mount(&mock_server)
        .await;

    let (session, navigator) =
        portal_session(&mock_server.uri(), Portal::Instructor, "/instructor/reports");
    session
        .login(&Credentials::new("ian@example.com", "secret"))
        .await
        .unwrap();

    let err = session.client().get("/api/admin/reports").await.unwrap_err();

    assert!(err.is_forbidden());
    assert!(err.to_string().contains("Admins only"));
    assert!(session.state().authenticated);
    assert_eq!(navigator.current_location(), "/instructor/dashboard");
}

#[tokio::test]
async fn test_logout_clears_even_when_backend_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(login_envelope("jane@example.com", "student")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (session, _) = portal_session(&mock_server.uri(), Portal::Student, "/student/dashboard");
    session
        .login(&Credentials::new("jane@example.com", "secret"))
        .await
        .unwrap();

    session.logout().await;

    assert!(!session.state().authenticated);
    assert!(session.identity().is_none());
}

#[tokio::test]
async fn test_guard_redirect_after_backend_rejects_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let (session, navigator) = portal_session(&mock_server.uri(), Portal::Admin, "/");

    let outcome = session.navigate("/admin/users").await;

    assert_eq!(outcome.location, "/admin/login?returnUrl=%2Fadmin%2Fusers");
    assert_eq!(navigator.current_location(), outcome.location);
}
