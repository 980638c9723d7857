use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use kiln_core::Program;
use tracing::debug;

use super::error::CommandError;

/// Load a program from a JSON file, or from stdin for `-`.
pub fn load_program(path: &Path) -> Result<Program, CommandError> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(CommandError::Stdin)?;
        buf
    } else {
        read_text(path)?
    };
    let program = Program::from_json(&json)?;
    debug!(
        classes = program.classes().len(),
        entry = %program.entrypoint(),
        "program loaded"
    );
    Ok(program)
}

pub fn read_text(path: &Path) -> Result<String, CommandError> {
    fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: PathBuf::from(path),
        source,
    })
}
