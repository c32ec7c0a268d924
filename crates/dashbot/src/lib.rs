//! # dashbot
//!
//! Core library for an automated Geometry Dash player.
//!
//! This crate provides:
//! - Windows process attachment and fault-tolerant memory reads
//! - Pointer-chain resolution of the play layer, player and level objects
//! - Snapshot building and the jump decision rule
//! - The fixed-rate control loop with keystroke injection
//! - A terminal status display and an interactive offset scanner

pub mod bot;
pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod input;
pub mod offset;
pub mod prelude;
pub mod process;
pub mod scan;

pub use bot::{
    ControlLoop, LoopPhase, NullSink, ReportSink, StatusBoard, StatusReport, StopSignal,
    TickOutcome,
};
pub use config::{BotConfig, BotConfigBuilder};
pub use display::{StatusDisplay, render_status, spawn_status_display};
pub use error::{Error, Result};
pub use game::{
    Action, EntityHandle, EntityLocator, GameSnapshot, LastAction, LoopState, Obstacle, Position,
    SnapshotBuilder, decide,
};
pub use input::{InputInjector, Key, KeyboardInjector};
pub use offset::{OffsetTable, load_offsets, save_offsets};
pub use process::{
    GAME_PROCESS_NAME, MemoryReader, PointerWidth, ProcessHandle, ProcessInfo, ReadMemory,
    RemoteMemory,
};
pub use scan::{OffsetScanner, ScanHit, ScanPrompter};
