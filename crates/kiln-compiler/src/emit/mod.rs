//! JavaScript emission from a resolved program.
//!
//! This module handles:
//! - Method body lowering and native body selection
//! - Class emission (prototype linkage, class ids, static initializers)
//! - Program assembly (class order, fragments, bootstrap)
//! - String pool and line map construction

mod body;
mod class;
mod config;
mod emitter;
mod error;
mod fragment;
pub mod line_map;
mod literal;
mod method;
mod output;
mod program;
pub mod string_pool;
pub mod writer;

#[cfg(test)]
mod method_tests;

pub use config::{EmitConfig, TargetFeatures};
pub use emitter::{Emitter, emit, emit_to};
pub use error::EmitError;
pub use fragment::{BODY_MARKER, Fragment, NoopTemplater, Templater};
pub use line_map::LineMapBuilder;
pub use literal::{constant, quote};
pub use output::{DirSink, EmitResult, EntryPointInfo, MemorySink, OutputSink};
pub use program::sorted_by_extending;
pub use string_pool::StringPoolBuilder;
pub use writer::SourceWriter;
