//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("kiln")
        .about("Emit JavaScript from resolved class graphs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(emit_command())
        .subcommand(check_command())
}

/// Emit a program.
pub fn emit_command() -> Command {
    Command::new("emit")
        .about("Emit JavaScript for a program")
        .override_usage(
            "\
  kiln emit <PROGRAM>
  kiln emit <PROGRAM> -o <DIR> [--name <FILE>] [--debug]",
        )
        .after_help(
            r#"EXAMPLES:
  kiln emit app.json                    # source to stdout
  kiln emit app.json -o dist            # dist/program.js
  kiln emit app.json -o dist --debug    # plus dist/program.js.map
  kiln emit app.json --no-switch        # no native switch statements
  cat app.json | kiln emit -            # program from stdin"#,
        )
        .arg(program_path_arg())
        .arg(out_dir_arg())
        .arg(name_arg())
        .arg(debug_arg())
        .arg(target_arg())
        .arg(no_switch_arg())
        .arg(prepend_arg())
        .arg(append_arg())
        .arg(wrap_arg())
        .arg(verbose_arg())
}

/// Validate a program by emitting it in memory.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check that a program emits without errors")
        .override_usage("  kiln check <PROGRAM> [-t <TARGET>]")
        .arg(program_path_arg())
        .arg(target_arg())
        .arg(no_switch_arg())
        .arg(verbose_arg())
}
