use clap::Parser;
use automail::cli::{Cli, Command, ConfigCommand};

#[test]
fn parses_analyze_text() {
    let cli = Cli::try_parse_from(["automail", "analyze", "--text", "Status do chamado?"])
        .expect("cli parse should work");
    match cli.command {
        Command::Analyze(args) => {
            assert_eq!(args.text.as_deref(), Some("Status do chamado?"));
            assert!(args.file.is_none());
            assert!(!args.stdin);
        }
        _ => panic!("expected analyze command"),
    }
}

#[test]
fn analyze_requires_a_source() {
    assert!(Cli::try_parse_from(["automail", "analyze"]).is_err());
}

#[test]
fn analyze_sources_are_exclusive() {
    let result = Cli::try_parse_from([
        "automail", "analyze", "--text", "hi", "--file", "email.txt",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_inbox_with_preloaded_file() {
    let cli = Cli::try_parse_from(["automail", "inbox", "--file", "pedido.pdf"])
        .expect("cli parse should work");
    match cli.command {
        Command::Inbox(args) => {
            assert_eq!(args.file.as_deref(), Some(std::path::Path::new("pedido.pdf")));
        }
        _ => panic!("expected inbox command"),
    }
}

#[test]
fn parses_config_set() {
    let cli = Cli::try_parse_from([
        "automail",
        "config",
        "set",
        "--base-url",
        "https://automail.example.com",
        "--compact-breakpoint",
        "90",
    ])
    .expect("cli parse should work");
    match cli.command {
        Command::Config(config) => match config.command {
            ConfigCommand::Set(set) => {
                assert_eq!(
                    set.base_url.as_deref(),
                    Some("https://automail.example.com")
                );
                assert_eq!(set.compact_breakpoint, Some(90));
                assert!(set.timeout_secs.is_none());
            }
            _ => panic!("expected config set"),
        },
        _ => panic!("expected config command"),
    }
}

#[test]
fn global_flags_apply_after_subcommand() {
    let cli = Cli::try_parse_from([
        "automail",
        "health",
        "--json",
        "-vv",
        "--profile",
        "work",
        "--api-url",
        "http://localhost:9000",
    ])
    .expect("cli parse should work");

    assert!(matches!(cli.command, Command::Health));
    assert!(cli.json);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.profile, "work");
    assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000"));
}
