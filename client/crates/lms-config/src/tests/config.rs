use crate::tests::{EnvGuard, setup_config_dir, write_config};
use crate::{Config, StorageKind, UnknownRolePolicy};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use lms_core::Portal;
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.api.base_url.as_str(), eq(crate::DEFAULT_BASE_URL));
    assert_that!(config.portal.kind, eq(Portal::Student));
    assert_that!(config.session.storage, eq(StorageKind::File));
    assert_that!(
        config.routing.unknown_role_policy,
        eq(UnknownRolePolicy::Deny)
    );
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_created() {
    // Given
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("nested/.lms");
    let _guard = EnvGuard::set(crate::CONFIG_DIR_ENV, nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert!(nested.exists());
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"
            [api]
            base_url = "https://lms.example.com"

            [portal]
            kind = "instructor"

            [session]
            storage = "memory"

            [routing]
            unknown_role_policy = "least_privilege"
            instructor_home = "/teach"
        "#,
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.api.base_url.as_str(), eq("https://lms.example.com"));
    assert_that!(config.portal.kind, eq(Portal::Instructor));
    assert_that!(config.portal.login_path(), eq("/instructor/login"));
    assert_that!(config.session.storage, eq(StorageKind::Memory));
    assert_that!(
        config.routing.unknown_role_policy,
        eq(UnknownRolePolicy::LeastPrivilege)
    );
    assert_that!(config.routing.instructor_home.as_str(), eq("/teach"));
    // Untouched sections keep defaults
    assert_that!(config.api.timeout_secs, eq(crate::DEFAULT_TIMEOUT_SECS));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"
            [portal]
            kind = "student"
        "#,
    );
    let _portal = EnvGuard::set("LMS_PORTAL", "admin");
    let _url = EnvGuard::set("LMS_API_BASE_URL", "http://10.0.0.5:9000");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.portal.kind, eq(Portal::Admin));
    assert_that!(config.api.base_url.as_str(), eq("http://10.0.0.5:9000"));
}

#[test]
#[serial]
fn given_invalid_env_value_when_load_then_previous_value_kept() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _portal = EnvGuard::set("LMS_PORTAL", "parent");
    let _policy = EnvGuard::set("LMS_ROUTING_UNKNOWN_ROLE_POLICY", "whatever");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.portal.kind, eq(Portal::Student));
    assert_that!(
        config.routing.unknown_role_policy,
        eq(UnknownRolePolicy::Deny)
    );
}

#[test]
#[serial]
fn given_config_dir_when_storage_dir_then_joined() {
    // Given
    let (temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(
        config.storage_dir().unwrap(),
        temp.path().join(crate::DEFAULT_STORAGE_DIR)
    );
}
