//! Core application primitives (orchestrators)

pub mod scanner;

pub use scanner::*;
