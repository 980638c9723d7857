#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Program AST consumed by the Kiln backend.
//!
//! Three layers:
//! - **Names and types**: `ClassName`, `Type`, `MethodType`, JVM descriptors
//! - **Bodies**: statement/expression trees derived from bytecode
//! - **Program**: classes, fields, methods and the class index
//!
//! Everything here is read-only once a `Program` is built. Loading bytecode
//! into this model is done elsewhere; the model only knows how to be
//! deserialized from JSON and queried.

pub mod ast;
pub mod literal;
pub mod name;
pub mod program;
pub mod types;


pub use ast::{BinaryOp, Body, Expr, FieldRef, Local, MethodRef, Stmt, SwitchCase, UnaryOp};
pub use literal::Literal;
pub use name::ClassName;
pub use program::{
    Class, ClassKind, CustomMain, Field, Method, MethodKind, MissingClass, NativeBody, Program,
    ProgramError,
};
pub use types::{MethodType, NumKind, Param, Type};
