use crate::{Cli, Commands};

use clap::Parser;

#[test]
fn given_login_args_when_parsed_then_token_and_ttl_captured() {
    let cli = Cli::try_parse_from(["edu", "login", "--token", "tok-1", "--ttl-secs", "60"]).unwrap();

    assert_eq!(
        cli.command,
        Commands::Login {
            token: String::from("tok-1"),
            ttl_secs: Some(60),
        }
    );
}

#[test]
fn given_global_flags_after_subcommand_when_parsed_then_applied() {
    let cli = Cli::try_parse_from([
        "edu",
        "bootstrap",
        "--host",
        "acme.school.example",
        "--server",
        "http://localhost:9000",
        "--pretty",
    ])
    .unwrap();

    assert_eq!(cli.command, Commands::Bootstrap);
    assert_eq!(cli.host.as_deref(), Some("acme.school.example"));
    assert_eq!(cli.server.as_deref(), Some("http://localhost:9000"));
    assert!(cli.pretty);
}

#[test]
fn given_login_without_token_when_parsed_then_error() {
    assert!(Cli::try_parse_from(["edu", "login"]).is_err());
}

#[test]
fn given_whoami_refresh_when_parsed_then_refresh_set() {
    let cli = Cli::try_parse_from(["edu", "whoami", "--refresh"]).unwrap();

    assert_eq!(cli.command, Commands::Whoami { refresh: true });
}
