//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::check::CheckArgs;
use crate::commands::emit::EmitArgs;

pub struct EmitParams {
    pub program_path: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub name: String,
    pub debug: bool,
    pub target: String,
    pub no_switch: bool,
    pub prepend: Vec<PathBuf>,
    pub append: Vec<PathBuf>,
    pub wrap: Option<PathBuf>,
    pub verbose: u8,
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program_path: program_path(m),
            out_dir: m.get_one::<PathBuf>("out_dir").cloned(),
            name: string_or(m, "name", "program.js"),
            debug: m.get_flag("debug"),
            target: string_or(m, "target", "js"),
            no_switch: m.get_flag("no_switch"),
            prepend: paths(m, "prepend"),
            append: paths(m, "append"),
            wrap: m.get_one::<PathBuf>("wrap").cloned(),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        Self {
            program_path: p.program_path,
            out_dir: p.out_dir,
            name: p.name,
            debug: p.debug,
            target: p.target,
            switch: !p.no_switch,
            prepend: p.prepend,
            append: p.append,
            wrap: p.wrap,
        }
    }
}

pub struct CheckParams {
    pub program_path: PathBuf,
    pub target: String,
    pub no_switch: bool,
    pub verbose: u8,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program_path: program_path(m),
            target: string_or(m, "target", "js"),
            no_switch: m.get_flag("no_switch"),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            program_path: p.program_path,
            target: p.target,
            switch: !p.no_switch,
        }
    }
}

/// Required positional; clap rejects the command line before this runs without it.
fn program_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("program_path")
        .cloned()
        .unwrap_or_default()
}

fn string_or(m: &ArgMatches, id: &str, default: &str) -> String {
    m.get_one::<String>(id)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn paths(m: &ArgMatches, id: &str) -> Vec<PathBuf> {
    m.get_many::<PathBuf>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
