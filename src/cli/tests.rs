use super::*;
use clap::CommandFactory;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("shelfcheck").chain(args.iter().copied()))
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parse_bool_accepts_human_tokens() {
    for t in ["yes", "YES", "true", "t", "y", "1", " True "] {
        assert!(parse_bool(t).unwrap(), "{t}");
    }
    for f in ["no", "False", "f", "n", "0"] {
        assert!(!parse_bool(f).unwrap(), "{f}");
    }
    assert!(matches!(parse_bool("maybe"), Err(Error::InvalidArgument(_))));
    assert!(parse_bool("").is_err());
}

#[test]
fn bare_flag_means_true_and_explicit_token_is_parsed() {
    let cli = parse(&["fix-artifacts", "--dry-run"]).unwrap();
    let Command::FixArtifacts { dry_run, delete, ext, .. } = cli.command else {
        panic!("expected fix-artifacts");
    };
    assert!(dry_run);
    assert!(!delete);
    assert_eq!(ext, "cue");

    let cli = parse(&["copy-covers", "--dry-run=no", "--embed", "y"]).unwrap();
    let Command::CopyCovers { dry_run, embed, .. } = cli.command else {
        panic!("expected copy-covers");
    };
    assert!(!dry_run);
    assert!(embed);
}

#[test]
fn malformed_boolean_is_rejected_at_startup() {
    assert!(parse(&["fix-artifacts", "--delete=perhaps"]).is_err());
}

#[test]
fn delete_and_move_are_exclusive() {
    assert!(parse(&["fix-artifacts", "--delete", "--move-to", "/tmp/misc"]).is_err());
    assert!(parse(&["fix-artifacts", "--ext", "jpg", "--directories"]).is_err());
}

#[test]
fn converted_audit_takes_subdir_overrides() {
    let cli = parse(&[
        "missing-converted-tracks",
        "--db",
        "/tmp/library.db",
        "--source-subdir",
        "FLAC",
        "--converted-subdir",
        "OPUS",
    ])
    .unwrap();
    let Command::MissingConvertedTracks { catalog, subdirs, ext, .. } = cli.command else {
        panic!("expected missing-converted-tracks");
    };
    assert_eq!(catalog.db, Some(PathBuf::from("/tmp/library.db")));
    assert_eq!(subdirs.converted_subdir.as_deref(), Some("OPUS"));
    assert_eq!(ext, None);
}

#[test]
fn catalog_audit_extension_is_optional() {
    let cli = parse(&["missing-catalog-tracks"]).unwrap();
    let Command::MissingCatalogTracks { ext, .. } = cli.command else {
        panic!("expected missing-catalog-tracks");
    };
    assert_eq!(ext, None);

    let cli = parse(&["missing-catalog-tracks", "--ext", "flac"]).unwrap();
    let Command::MissingCatalogTracks { ext, .. } = cli.command else {
        panic!("expected missing-catalog-tracks");
    };
    assert_eq!(ext.as_deref(), Some("flac"));
}
