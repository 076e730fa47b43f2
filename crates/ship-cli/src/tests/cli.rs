use crate::{Cli, Commands};

use std::path::PathBuf;

use clap::Parser;
use googletest::prelude::*;
use secrecy::ExposeSecret;

#[test]
fn given_login_args_then_parsed() {
    let cli = Cli::try_parse_from(["xenship", "login", "--username", "bob", "--password", "secret"])
        .unwrap();

    let Commands::Login { username, password } = cli.command else {
        panic!("expected login, got {:?}", cli.command);
    };
    assert_that!(username.as_str(), eq("bob"));
    assert_that!(password.expose_secret(), eq("secret"));
    assert!(!cli.pretty);
}

#[test]
fn given_login_command_when_debug_formatted_then_password_hidden() {
    let cli = Cli::try_parse_from(["xenship", "login", "-u", "bob", "-p", "hunter22"]).unwrap();

    let debug = format!("{:?}", cli.command);

    assert_that!(debug.as_str(), not(contains_substring("hunter22")));
}

#[test]
fn given_login_without_password_then_rejected() {
    let result = Cli::try_parse_from(["xenship", "login", "--username", "bob"]);

    assert!(result.is_err());
}

#[test]
fn given_shipments_without_flags_then_defaults_apply() {
    let cli = Cli::try_parse_from(["xenship", "shipments"]).unwrap();

    assert!(matches!(
        cli.command,
        Commands::Shipments {
            page: 1,
            rows_per_page: 10,
            json: false,
        }
    ));
}

#[test]
fn given_global_flags_after_subcommand_then_parsed() {
    let cli = Cli::try_parse_from([
        "xenship",
        "shipments",
        "--page",
        "3",
        "--rows-per-page",
        "20",
        "--pretty",
        "--config-dir",
        "/tmp/xenship",
    ])
    .unwrap();

    assert!(cli.pretty);
    assert_that!(cli.config_dir, some(eq(&PathBuf::from("/tmp/xenship"))));
    assert!(matches!(
        cli.command,
        Commands::Shipments {
            page: 3,
            rows_per_page: 20,
            json: false,
        }
    ));
}

#[test]
fn given_kebab_case_subcommand_then_login_microsoft() {
    let cli = Cli::try_parse_from(["xenship", "login-microsoft"]).unwrap();

    assert!(matches!(cli.command, Commands::LoginMicrosoft));
}
