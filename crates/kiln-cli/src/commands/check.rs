use std::path::PathBuf;

use kiln_compiler::{EmitConfig, NoopTemplater, TargetFeatures, emit};

use super::error::CommandError;
use super::program_loader::load_program;

pub struct CheckArgs {
    pub program_path: PathBuf,
    pub target: String,
    pub switch: bool,
}

pub fn run(args: CheckArgs) {
    match execute(&args) {
        Ok(summary) => println!("{}", summary),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}

/// Emit in memory and summarize; nothing is written.
pub fn execute(args: &CheckArgs) -> Result<String, CommandError> {
    let program = load_program(&args.program_path)?;
    let config = EmitConfig::new()
        .target(args.target.as_str())
        .features(TargetFeatures {
            switch: args.switch,
        });
    let result = emit(&program, &config, &NoopTemplater)?;
    let stubs = result.source.matches("// Errored method:").count();
    Ok(format!(
        "ok: {} classes, {} bytes, {} stubbed methods",
        program.classes().len(),
        result.source.len(),
        stubs
    ))
}
