//! Core emitter struct and entry points.

use kiln_core::{Literal, Program};

use super::literal::constant;
use super::string_pool::StringPoolBuilder;
use super::{EmitConfig, EmitError, EmitResult, OutputSink, Templater};
use crate::naming::NameResolver;

/// Runtime base every root class links its prototype to.
pub(super) const OBJECT_BASE: &str = "java_lang_Object_base";

/// JavaScript emitter for one program.
///
/// Owns the run-scoped mutable state: the name resolver's memo tables and
/// the string pool. Construct one per run.
pub struct Emitter<'a> {
    pub(super) program: &'a Program,
    pub(super) config: &'a EmitConfig,
    pub(super) templater: &'a dyn Templater,
    pub(super) names: NameResolver<'a>,
    pub(super) strings: StringPoolBuilder,
}

impl<'a> Emitter<'a> {
    pub fn new(program: &'a Program, config: &'a EmitConfig, templater: &'a dyn Templater) -> Self {
        Self {
            program,
            config,
            templater,
            names: NameResolver::new(program),
            strings: StringPoolBuilder::new(),
        }
    }

    pub fn names(&mut self) -> &mut NameResolver<'a> {
        &mut self.names
    }

    pub fn strings(&self) -> &StringPoolBuilder {
        &self.strings
    }

    /// Literal text; strings become pool lookups.
    pub(super) fn literal(&mut self, lit: &Literal) -> String {
        match lit {
            Literal::String(s) => format!("S[{}]", self.strings.alloc(s)),
            other => constant(other),
        }
    }
}

/// Emit a program to text.
pub fn emit(
    program: &Program,
    config: &EmitConfig,
    templater: &dyn Templater,
) -> Result<EmitResult, EmitError> {
    Emitter::new(program, config, templater).emit_program()
}

/// Emit a program and write its artifacts to `sink`.
///
/// Nothing is written unless emission succeeds.
pub fn emit_to(
    program: &Program,
    config: &EmitConfig,
    templater: &dyn Templater,
    sink: &mut dyn OutputSink,
) -> Result<EmitResult, EmitError> {
    let result = emit(program, config, templater)?;
    sink.write(config.name(), &result.source)?;
    if let Some(map) = &result.source_map {
        sink.write(&config.map_name(), map)?;
    }
    Ok(result)
}
