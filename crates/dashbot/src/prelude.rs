//! Prelude module for convenient imports
//!
//! ```ignore
//! use dashbot::prelude::*;
//! ```
//!
//! Brings the process, offset, loop and configuration types into scope,
//! along with `Error` and `Result`.

// Attaching and reading
pub use crate::process::{MemoryReader, PointerWidth, ProcessHandle, ReadMemory};

// Offsets and configuration
pub use crate::config::BotConfig;
pub use crate::offset::OffsetTable;

// Control loop
pub use crate::bot::{ControlLoop, NullSink, ReportSink, StatusBoard, StopSignal};
pub use crate::game::{Action, GameSnapshot, decide};
pub use crate::input::{InputInjector, KeyboardInjector};

// Error handling
pub use crate::error::{Error, Result};
