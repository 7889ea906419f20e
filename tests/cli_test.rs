use archetyper::cli::Args;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("archetyper")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["./archetyper.yml"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.config, PathBuf::from("./archetyper.yml"));
    assert!(!parsed.force);
    assert!(!parsed.verbose);
}

#[test]
fn test_all_flags() {
    let args = make_args(&["--force", "--verbose", "./project"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.force);
    assert!(parsed.verbose);
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-f", "-v", "./project"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.force);
    assert!(parsed.verbose);
}

#[test]
fn test_missing_args() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["./archetyper.yml", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}
