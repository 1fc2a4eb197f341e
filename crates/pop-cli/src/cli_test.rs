use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_serve() {
    let cli = Cli::try_parse_from([
        "popchart",
        "serve",
        "--port",
        "8080",
        "--csv-path",
        "data.csv",
        "--skip-ingest",
    ])
    .unwrap();
    match cli.command {
        Commands::Serve(args) => {
            assert_eq!(args.port, Some(8080));
            assert_eq!(args.source.csv_path.as_deref(), Some("data.csv"));
            assert!(args.skip_ingest);
        }
        other => panic!("expected serve, got {other:?}"),
    }
}

#[test]
fn test_parse_view_defaults() {
    let cli = Cli::try_parse_from(["popchart", "view"]).unwrap();
    match cli.command {
        Commands::View(args) => {
            assert_eq!(args.format, ViewFormat::Text);
            assert_eq!(args.width, 50);
            assert!(!args.play);
            assert!(args.year.is_none());
        }
        other => panic!("expected view, got {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["popchart", "ingest", "-v", "-c", "custom.yml"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.config.as_deref(), Some("custom.yml"));
}

#[test]
fn test_invalid_port_rejected() {
    assert!(Cli::try_parse_from(["popchart", "serve", "--port", "http"]).is_err());
}
