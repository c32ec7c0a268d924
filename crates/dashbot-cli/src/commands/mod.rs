//! CLI command implementations.

pub mod offsets;
pub mod probe;
pub mod run;
pub mod scan;
