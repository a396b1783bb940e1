//! Core types: protocol-agnostic contracts for tools, resources and errors.

pub mod content;
pub mod error;
pub mod tool;
