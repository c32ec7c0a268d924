//! Status publishing from the control loop to the display.
//!
//! The loop overwrites a single latest value; readers poll it on their own
//! schedule and simply miss whatever was overwritten in between.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::game::{GameSnapshot, LastAction, LoopState, Obstacle, Position};

/// What the display shows for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub player: Position,
    pub obstacles: Vec<Obstacle>,
    pub action: LastAction,
    pub death_count: u32,
}

impl StatusReport {
    pub fn new(snapshot: &GameSnapshot, state: &LoopState) -> Self {
        Self {
            player: snapshot.player,
            obstacles: snapshot.obstacles.clone(),
            action: state.last_action,
            death_count: state.death_count,
        }
    }
}

/// Receiver of per-tick status.
///
/// Called from the control loop at tick rate; implementations must be cheap
/// and must swallow their own failures.
pub trait ReportSink {
    fn report(&self, report: StatusReport);
}

impl<T: ReportSink + ?Sized> ReportSink for &T {
    fn report(&self, report: StatusReport) {
        (**self).report(report);
    }
}

impl<T: ReportSink + ?Sized> ReportSink for Arc<T> {
    fn report(&self, report: StatusReport) {
        (**self).report(report);
    }
}

/// Sink that drops everything, for runs without a display
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn report(&self, _report: StatusReport) {}
}

#[derive(Debug, Default)]
struct Published {
    generation: u64,
    latest: Option<StatusReport>,
}

/// Latest-value mailbox shared by the loop (writer) and the display (reader)
#[derive(Debug, Default)]
pub struct StatusBoard {
    inner: Mutex<Published>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, report: StatusReport) {
        let mut published = self.lock();
        published.generation += 1;
        published.latest = Some(report);
    }

    pub fn latest(&self) -> Option<StatusReport> {
        self.lock().latest.clone()
    }

    /// The latest report if it is newer than `generation`, with its generation
    pub fn latest_since(&self, generation: u64) -> Option<(u64, StatusReport)> {
        let published = self.lock();
        if published.generation <= generation {
            return None;
        }
        published
            .latest
            .clone()
            .map(|report| (published.generation, report))
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    // Poisoning is ignored: the stored report is always a whole value
    fn lock(&self) -> MutexGuard<'_, Published> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ReportSink for StatusBoard {
    fn report(&self, report: StatusReport) {
        self.publish(report);
    }
}
