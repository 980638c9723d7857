//! Kiln compiler: the JavaScript backend.
//!
//! This crate turns a resolved `kiln_core::Program` into a single JavaScript
//! source artifact:
//! - `coerce` - primitive conversion and operator lowering
//! - `naming` - collision-free identifiers for classes, fields and methods
//! - `emit` - body lowering, class and program emission, string pool, line map

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod coerce;
pub mod emit;
pub mod naming;

#[cfg(test)]
mod coerce_tests;
#[cfg(test)]
pub mod test_utils;

pub use emit::{
    DirSink, EmitConfig, EmitError, EmitResult, Emitter, EntryPointInfo, Fragment, MemorySink,
    NoopTemplater, OutputSink, TargetFeatures, Templater, emit, emit_to,
};
pub use naming::NameResolver;

/// Result type for emission.
pub type Result<T> = std::result::Result<T, EmitError>;
