pub mod check;
pub mod emit;
pub mod error;
pub mod program_loader;
