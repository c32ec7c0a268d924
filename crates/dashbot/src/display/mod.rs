//! Terminal status display.
//!
//! Runs on its own thread, polling the [`StatusBoard`] at a fixed refresh
//! rate and redrawing a small block in place. It never touches the control
//! loop directly; a slow terminal only means skipped reports.

use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::cursor::MoveUp;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::bot::{StatusBoard, StatusReport, StopSignal};
use crate::game::LastAction;

/// Render a report as display lines.
///
/// Shows at most `rows` obstacles.
pub fn render_status(report: &StatusReport, rows: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(4 + rows);
    lines.push(format!(
        "Player: ({:.1}, {:.1})",
        report.player.x, report.player.y
    ));
    lines.push(format!("Obstacles ahead: {}", report.obstacles.len()));
    lines.push(format!("Action: {}", report.action));
    lines.push(format!("Deaths: {}", report.death_count));
    for (i, obstacle) in report.obstacles.iter().take(rows).enumerate() {
        lines.push(format!(
            "Obj {}: ({:.1}, {:.1}) type={}",
            i, obstacle.x, obstacle.y, obstacle.kind
        ));
    }
    lines
}

/// Redraws the status block in place on a terminal
pub struct StatusDisplay<W: Write> {
    out: W,
    rows: usize,
    colored: bool,
    drawn_lines: usize,
}

impl<W: Write> StatusDisplay<W> {
    pub fn new(out: W, rows: usize, colored: bool) -> Self {
        Self {
            out,
            rows,
            colored,
            drawn_lines: 0,
        }
    }

    pub fn draw(&mut self, report: &StatusReport) -> io::Result<()> {
        let lines = render_status(report, self.rows);

        if self.drawn_lines > 0 {
            // Back over the previous block, then wipe it
            let up = u16::try_from(self.drawn_lines).unwrap_or(u16::MAX);
            queue!(self.out, MoveUp(up), Clear(ClearType::FromCursorDown))?;
        }

        for (i, line) in lines.iter().enumerate() {
            // Line 2 is the action label
            if self.colored && i == 2 {
                writeln!(self.out, "{}", colorize_action(line, report.action))?;
            } else {
                writeln!(self.out, "{}", line)?;
            }
        }
        self.out.flush()?;

        self.drawn_lines = lines.len();
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

fn colorize_action(line: &str, action: LastAction) -> String {
    match action {
        LastAction::Jump => line.green().bold().to_string(),
        LastAction::Dead => line.red().to_string(),
        LastAction::Run => line.cyan().to_string(),
        LastAction::Waiting => line.dimmed().to_string(),
    }
}

/// Spawn the display thread. It exits when `signal` stops.
pub fn spawn_status_display(
    board: Arc<StatusBoard>,
    signal: Arc<StopSignal>,
    refresh: Duration,
    rows: usize,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut display = StatusDisplay::new(io::stdout(), rows, true);
        let mut seen = 0u64;
        debug!("Status display started");

        loop {
            if let Some((generation, report)) = board.latest_since(seen) {
                seen = generation;
                if let Err(e) = display.draw(&report) {
                    debug!("Status display write failed: {}", e);
                }
            }
            if signal.wait(refresh) {
                break;
            }
        }

        debug!("Status display stopped");
    })
}
