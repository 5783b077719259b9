use super::commands::map_only_to_scope;
use super::*;
use clap::Parser;

#[test]
fn test_parse_generate_args() {
    let cli = Cli::try_parse_from([
        "layerforge",
        "generate",
        "--root",
        "/tmp/solution",
        "--dry-run",
        "--only",
        "logic,api",
    ])
    .unwrap();
    match cli.command {
        Commands::Generate {
            root,
            dry_run,
            only,
            force,
            ..
        } => {
            assert_eq!(root, std::path::PathBuf::from("/tmp/solution"));
            assert!(dry_run);
            assert!(!force);
            assert_eq!(only, Some(vec![OnlyLayer::Logic, OnlyLayer::Api]));
        }
        _ => panic!("expected generate"),
    }
}

#[test]
fn test_parse_explain_setting_args() {
    let cli = Cli::try_parse_from([
        "layerforge",
        "explain-setting",
        "--unit",
        "Logic",
        "--item",
        "Property",
        "--name",
        "CustomerFilter.Name",
        "--setting",
        "Generate",
    ])
    .unwrap();
    assert!(matches!(cli.command, Commands::ExplainSetting { .. }));
}

#[test]
fn test_map_only_to_scope() {
    let scope = map_only_to_scope(None);
    assert!(scope.logic && scope.api && scope.site);
    assert!(scope.client_app && scope.client_script && scope.facade);

    let scope = map_only_to_scope(Some(&[OnlyLayer::Facade]));
    assert!(scope.facade);
    assert!(!scope.logic && !scope.api && !scope.site);
    assert!(!scope.client_app && !scope.client_script);
}
