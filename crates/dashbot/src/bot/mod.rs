//! The reactive control loop.
//!
//! `ControlLoop` ties the pieces together once per tick:
//! - resolve entities and build a [`GameSnapshot`]
//! - on death, count it and back off
//! - otherwise decide, press jump if needed
//! - publish status, then sleep until the next tick
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dashbot::bot::{ControlLoop, StatusBoard, StopSignal};
//! use dashbot::input::KeyboardInjector;
//!
//! let board = Arc::new(StatusBoard::new());
//! let signal = Arc::new(StopSignal::new());
//! let mut bot = ControlLoop::new(
//!     &reader,
//!     process.base_address,
//!     &offsets,
//!     KeyboardInjector::new(),
//!     Arc::clone(&board),
//!     Arc::clone(&signal),
//! );
//! bot.run()?;
//! ```

mod signal;
mod status;

use std::sync::Arc;
use std::time::Duration;

use strum::Display;
use tracing::{debug, error, info};

use crate::config::BotConfig;
use crate::error::{Error, Result};
use crate::game::{
    Action, EntityLocator, GameSnapshot, LastAction, LoopState, SnapshotBuilder, decide,
};
use crate::input::InputInjector;
use crate::offset::OffsetTable;
use crate::process::ReadMemory;

pub use signal::StopSignal;
pub use status::{NullSink, ReportSink, StatusBoard, StatusReport};

/// Lifecycle of a control loop. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LoopPhase {
    Idle,
    Running,
    Stopped,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Player dead or absent; nothing was decided
    Dead,
    Acted(Action),
}

pub struct ControlLoop<'a, R: ReadMemory + ?Sized, I: InputInjector, S: ReportSink> {
    reader: &'a R,
    module_base: u64,
    offsets: &'a OffsetTable,
    config: BotConfig,
    snapshots: SnapshotBuilder,
    injector: I,
    sink: S,
    signal: Arc<StopSignal>,
    phase: LoopPhase,
    state: LoopState,
}

impl<'a, R: ReadMemory + ?Sized, I: InputInjector, S: ReportSink> ControlLoop<'a, R, I, S> {
    /// Create a loop with default configuration
    pub fn new(
        reader: &'a R,
        module_base: u64,
        offsets: &'a OffsetTable,
        injector: I,
        sink: S,
        signal: Arc<StopSignal>,
    ) -> Self {
        Self::with_config(
            reader,
            module_base,
            offsets,
            BotConfig::default(),
            injector,
            sink,
            signal,
        )
    }

    pub fn with_config(
        reader: &'a R,
        module_base: u64,
        offsets: &'a OffsetTable,
        config: BotConfig,
        injector: I,
        sink: S,
        signal: Arc<StopSignal>,
    ) -> Self {
        debug!(
            "Control loop for base 0x{:X}, offsets {} (playlayer=0x{:X})",
            module_base, offsets.version, offsets.playlayer
        );

        Self {
            reader,
            module_base,
            offsets,
            snapshots: SnapshotBuilder::from_config(&config),
            config,
            injector,
            sink,
            signal,
            phase: LoopPhase::Idle,
            state: LoopState::default(),
        }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn phase(&self) -> LoopPhase {
        if self.signal.is_stopped() {
            LoopPhase::Stopped
        } else {
            self.phase
        }
    }

    /// Handle other threads can use to stop this loop
    pub fn stop_handle(&self) -> Arc<StopSignal> {
        Arc::clone(&self.signal)
    }

    /// Idle -> Running
    pub fn start(&mut self) -> Result<()> {
        match self.phase() {
            LoopPhase::Idle => {
                self.phase = LoopPhase::Running;
                self.state.begin();
                info!("Control loop started");
                Ok(())
            }
            phase => Err(Error::InvalidLoopTransition(phase)),
        }
    }

    /// Request a stop; takes effect before the next tick. Idempotent.
    pub fn stop(&mut self) {
        self.signal.stop();
        self.phase = LoopPhase::Stopped;
        self.state.running = false;
    }

    /// Run ticks until stopped or a fatal fault occurs.
    ///
    /// Starts the loop if it is still idle. A fatal fault is logged once and
    /// returned; the loop is `Stopped` afterwards either way.
    pub fn run(&mut self) -> Result<()> {
        if self.phase == LoopPhase::Idle {
            self.start()?;
        } else if self.phase() != LoopPhase::Running {
            return Err(Error::InvalidLoopTransition(self.phase()));
        }

        let result = self.run_ticks();

        self.phase = LoopPhase::Stopped;
        self.state.running = false;

        match &result {
            Ok(()) => info!(
                "Control loop stopped ({} deaths)",
                self.state.death_count
            ),
            Err(e) => error!("Control loop aborted: {}", e),
        }
        result
    }

    fn run_ticks(&mut self) -> Result<()> {
        while !self.signal.is_stopped() {
            let outcome = match self.tick() {
                Ok(outcome) => outcome,
                // Stopped from another thread since the check above
                Err(Error::InvalidLoopTransition(LoopPhase::Stopped)) => break,
                Err(e) => return Err(e),
            };
            if self.signal.wait(self.pause_after(outcome)) {
                break;
            }
        }
        Ok(())
    }

    /// One build-decide-act-report cycle.
    ///
    /// Only valid while `Running`. Past that check the only error is the
    /// target going away; everything read from the game degrades instead of
    /// failing.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let phase = self.phase();
        if phase != LoopPhase::Running {
            return Err(Error::InvalidLoopTransition(phase));
        }
        if !self.reader.is_attached() {
            return Err(Error::ProcessExited);
        }

        let snapshot = self.snapshot();

        if snapshot.is_dead {
            let deaths = self.state.record_death();
            info!("Died ({}) - waiting for restart...", deaths);
            self.publish(&snapshot);
            return Ok(TickOutcome::Dead);
        }

        let action = decide(&snapshot);
        self.state.last_action = match action {
            Action::Jump => {
                self.injector.press_jump();
                LastAction::Jump
            }
            Action::Hold => LastAction::Run,
        };
        self.publish(&snapshot);

        Ok(TickOutcome::Acted(action))
    }

    /// Build a snapshot without acting on it
    pub fn snapshot(&self) -> GameSnapshot {
        let locator = EntityLocator::new(
            self.reader,
            self.module_base,
            self.offsets,
            self.config.object_scan_limit,
        );
        self.snapshots.build(&locator)
    }

    fn publish(&self, snapshot: &GameSnapshot) {
        self.sink.report(StatusReport::new(snapshot, &self.state));
    }

    /// Pause used after the given outcome
    pub fn pause_after(&self, outcome: TickOutcome) -> Duration {
        match outcome {
            TickOutcome::Dead => self.config.death_cooldown,
            TickOutcome::Acted(_) => self.config.tick_interval,
        }
    }
}
