use std::io;
use std::path::PathBuf;

use kiln_compiler::EmitError;
use kiln_core::ProgramError;

/// Failure of a CLI command, reported on stderr.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error("failed to encode entry point: {0}")]
    Encode(#[from] serde_json::Error),
}
