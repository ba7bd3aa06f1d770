use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_info_defaults() {
    let cli = Cli::try_parse_from(["cm", "info", "--snapshot", "state.yml"]).unwrap();
    assert_eq!(cli.global.project_dir, ".");
    assert!(!cli.global.verbose);
    match cli.command {
        Commands::Info(args) => {
            assert_eq!(args.snapshot, "state.yml");
            assert_eq!(args.state, InfoView::All);
            assert_eq!(args.output, InfoOutput::Table);
        }
        other => panic!("expected info, got {other:?}"),
    }
}

#[test]
fn test_parse_info_filters() {
    let cli = Cli::try_parse_from([
        "cm", "-p", "proj", "info", "-s", "state.json", "--state", "pending", "-o", "json",
    ])
    .unwrap();
    assert_eq!(cli.global.project_dir, "proj");
    match cli.command {
        Commands::Info(args) => {
            assert_eq!(args.state, InfoView::Pending);
            assert_eq!(args.output, InfoOutput::Json);
        }
        other => panic!("expected info, got {other:?}"),
    }
}

#[test]
fn test_parse_validate_lenient() {
    let cli = Cli::try_parse_from([
        "cm", "validate", "-s", "state.yml", "--lenient", "-c", "custom.yml", "-v",
    ])
    .unwrap();
    assert_eq!(cli.global.config.as_deref(), Some("custom.yml"));
    assert!(cli.global.verbose);
    match cli.command {
        Commands::Validate(args) => assert!(args.lenient),
        other => panic!("expected validate, got {other:?}"),
    }
}
