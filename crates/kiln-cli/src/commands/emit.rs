use std::io::{self, Write};
use std::path::PathBuf;

use kiln_compiler::{
    DirSink, EmitConfig, EmitResult, Fragment, NoopTemplater, TargetFeatures, emit, emit_to,
};
use tracing::{info, warn};

use super::error::CommandError;
use super::program_loader::{load_program, read_text};

pub struct EmitArgs {
    pub program_path: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub name: String,
    pub debug: bool,
    pub target: String,
    pub switch: bool,
    pub prepend: Vec<PathBuf>,
    pub append: Vec<PathBuf>,
    pub wrap: Option<PathBuf>,
}

pub fn run(args: EmitArgs) {
    let mut stdout = io::stdout().lock();
    if let Err(err) = execute(&args, &mut stdout) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

/// Emit the program; the source goes to `stdout` unless an output directory is set.
pub fn execute(args: &EmitArgs, stdout: &mut dyn Write) -> Result<EmitResult, CommandError> {
    let program = load_program(&args.program_path)?;
    let config = build_config(args)?;

    let result = match &args.out_dir {
        Some(dir) => {
            let mut sink = DirSink::new(dir);
            let result = emit_to(&program, &config, &NoopTemplater, &mut sink)?;
            info!(dir = %dir.display(), name = config.name(), "artifacts written");
            result
        }
        None => {
            let result = emit(&program, &config, &NoopTemplater)?;
            if result.source_map.is_some() {
                warn!("source map discarded: pass --out-dir to keep it");
            }
            stdout.write_all(result.source.as_bytes())?;
            stdout.flush()?;
            result
        }
    };

    let entry = serde_json::to_string(&result.entry_point)?;
    info!(entry = %entry, "entry point descriptor");
    Ok(result)
}

fn build_config(args: &EmitArgs) -> Result<EmitConfig, CommandError> {
    let mut config = EmitConfig::new()
        .target(args.target.as_str())
        .debug(args.debug)
        .output_name(args.name.as_str())
        .features(TargetFeatures {
            switch: args.switch,
        });
    for path in &args.prepend {
        config = config.fragment(Fragment::prepend(read_text(path)?));
    }
    for path in &args.append {
        config = config.fragment(Fragment::append(read_text(path)?));
    }
    if let Some(path) = &args.wrap {
        config = config.fragment(Fragment::prepend_append(read_text(path)?));
    }
    Ok(config)
}
