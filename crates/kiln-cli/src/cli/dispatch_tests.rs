//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, emit_command};
use crate::commands::emit::EmitArgs;

#[test]
fn emit_defaults() {
    let m = emit_command()
        .try_get_matches_from(["emit", "app.json"])
        .unwrap();
    let params = EmitParams::from_matches(&m);

    assert_eq!(params.program_path, PathBuf::from("app.json"));
    assert_eq!(params.out_dir, None);
    assert_eq!(params.name, "program.js");
    assert_eq!(params.target, "js");
    assert!(!params.debug);
    assert!(!params.no_switch);
    assert_eq!(params.verbose, 0);
}

#[test]
fn emit_all_flags() {
    let m = emit_command()
        .try_get_matches_from([
            "emit",
            "app.json",
            "-o",
            "dist",
            "--name",
            "app.js",
            "--debug",
            "--target",
            "node",
            "--no-switch",
            "--prepend",
            "head.js",
            "--prepend",
            "polyfill.js",
            "--append",
            "tail.js",
            "--wrap",
            "wrap.js",
            "-vv",
        ])
        .unwrap();
    let args: EmitArgs = EmitParams::from_matches(&m).into();

    assert_eq!(args.out_dir, Some(PathBuf::from("dist")));
    assert_eq!(args.name, "app.js");
    assert!(args.debug);
    assert_eq!(args.target, "node");
    assert!(!args.switch);
    assert_eq!(
        args.prepend,
        [PathBuf::from("head.js"), PathBuf::from("polyfill.js")]
    );
    assert_eq!(args.append, [PathBuf::from("tail.js")]);
    assert_eq!(args.wrap, Some(PathBuf::from("wrap.js")));
}

#[test]
fn emit_counts_verbosity() {
    let m = emit_command()
        .try_get_matches_from(["emit", "app.json", "-v"])
        .unwrap();

    assert_eq!(EmitParams::from_matches(&m).verbose, 1);
}

#[test]
fn emit_requires_program() {
    let result = emit_command().try_get_matches_from(["emit"]);

    assert!(result.is_err());
}

#[test]
fn emit_accepts_stdin_marker() {
    let m = emit_command()
        .try_get_matches_from(["emit", "-"])
        .unwrap();

    assert_eq!(EmitParams::from_matches(&m).program_path, PathBuf::from("-"));
}

#[test]
fn check_rejects_output_flags() {
    let result = check_command().try_get_matches_from(["check", "app.json", "-o", "dist"]);

    assert!(result.is_err());
}

#[test]
fn check_params() {
    let m = check_command()
        .try_get_matches_from(["check", "app.json", "-t", "node", "--no-switch"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.program_path, PathBuf::from("app.json"));
    assert_eq!(params.target, "node");
    assert!(params.no_switch);
}

#[test]
fn emit_help_lists_examples() {
    let help = emit_command().render_long_help().to_string();

    assert!(help.contains("kiln emit app.json -o dist --debug"));
    assert!(help.contains("--no-switch"));
}
