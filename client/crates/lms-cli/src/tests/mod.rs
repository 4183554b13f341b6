use crate::cli::Cli;
use crate::commands::Commands;

use clap::Parser;
use googletest::prelude::*;
use lms_config::Config;
use lms_core::Portal;

#[test]
fn given_global_flags_after_subcommand_when_parsed_then_accepted() {
    let cli = Cli::try_parse_from([
        "lms",
        "navigate",
        "/admin/users",
        "/student/courses",
        "--portal",
        "admin",
        "--pretty",
    ])
    .unwrap();

    assert_that!(
        cli.command,
        eq(&Commands::Navigate {
            locations: vec!["/admin/users".to_string(), "/student/courses".to_string()]
        })
    );
    assert_that!(cli.portal, some(eq("admin")));
    assert_that!(cli.pretty, eq(true));
}

#[test]
fn given_navigate_without_locations_when_parsed_then_rejected() {
    assert!(Cli::try_parse_from(["lms", "navigate"]).is_err());
}

#[test]
fn given_password_without_email_when_parsed_then_rejected() {
    assert!(Cli::try_parse_from(["lms", "--password", "secret", "login"]).is_err());
}

#[test]
fn given_check_force_when_parsed_then_flag_set() {
    let cli = Cli::try_parse_from(["lms", "check", "--force"]).unwrap();
    assert_that!(cli.command, eq(&Commands::Check { force: true }));
}

#[test]
fn given_overrides_when_applied_then_config_updated() {
    let cli = Cli::try_parse_from([
        "lms",
        "--portal",
        "Instructor",
        "--server",
        "http://10.0.0.5:9000",
        "--log-level",
        "debug",
        "whoami",
    ])
    .unwrap();
    let mut config = Config::default();

    cli.apply_overrides(&mut config).unwrap();

    assert_that!(config.portal.kind, eq(Portal::Instructor));
    assert_that!(config.api.base_url, eq("http://10.0.0.5:9000"));
    assert_that!(config.logging.level.0, eq(log::LevelFilter::Debug));
}

#[test]
fn given_unknown_portal_when_applied_then_error() {
    let cli = Cli::try_parse_from(["lms", "--portal", "registrar", "whoami"]).unwrap();
    let mut config = Config::default();

    assert!(cli.apply_overrides(&mut config).is_err());
}

#[test]
fn given_email_and_password_when_parsed_then_credentials_built() {
    let cli = Cli::try_parse_from([
        "lms",
        "--email",
        "jane@example.com",
        "--password",
        "secret",
        "check",
    ])
    .unwrap();

    let credentials = cli.credentials().unwrap();
    assert_that!(credentials.email, eq("jane@example.com"));
    assert!(Cli::try_parse_from(["lms", "whoami"]).unwrap().credentials().is_none());
}
