//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Program JSON file, or `-` for stdin (positional).
pub fn program_path_arg() -> Arg {
    Arg::new("program_path")
        .value_name("PROGRAM")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Resolved program as JSON (- for stdin)")
}

/// Output directory (-o/--out-dir).
pub fn out_dir_arg() -> Arg {
    Arg::new("out_dir")
        .short('o')
        .long("out-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Write artifacts under DIR instead of printing the source")
}

/// Source artifact name (--name).
pub fn name_arg() -> Arg {
    Arg::new("name")
        .long("name")
        .value_name("FILE")
        .default_value("program.js")
        .help("Name of the emitted source artifact")
}

/// Line map generation (--debug).
pub fn debug_arg() -> Arg {
    Arg::new("debug")
        .long("debug")
        .action(ArgAction::SetTrue)
        .help("Emit a source map next to the source")
}

/// Target name (-t/--target).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .short('t')
        .long("target")
        .value_name("TARGET")
        .default_value("js")
        .help("Target selecting native bodies and custom entry points")
}

/// Disable native switch statements (--no-switch).
pub fn no_switch_arg() -> Arg {
    Arg::new("no_switch")
        .long("no-switch")
        .action(ArgAction::SetTrue)
        .help("Lower switch statements to labeled if chains")
}

/// Text placed before the program (--prepend).
pub fn prepend_arg() -> Arg {
    Arg::new("prepend")
        .long("prepend")
        .value_name("FILE")
        .action(ArgAction::Append)
        .value_parser(value_parser!(PathBuf))
        .help("Insert FILE before the program (repeatable)")
}

/// Text placed after the program (--append).
pub fn append_arg() -> Arg {
    Arg::new("append")
        .long("append")
        .value_name("FILE")
        .action(ArgAction::Append)
        .value_parser(value_parser!(PathBuf))
        .help("Insert FILE after the program (repeatable)")
}

/// Combined wrapper split on the body marker (--wrap).
pub fn wrap_arg() -> Arg {
    Arg::new("wrap")
        .long("wrap")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Wrap the program in FILE, split at /* ## BODY ## */")
}

/// Verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for info, -vv for debug)")
}
