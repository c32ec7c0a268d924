//! Main play mode command.

use std::sync::Arc;

use anyhow::Result;
use dashbot::config::timing;
use dashbot::input::window;
use dashbot::{
    BotConfig, ControlLoop, Error, GAME_PROCESS_NAME, KeyboardInjector, MemoryReader, NullSink,
    OffsetTable, ProcessHandle, StatusBoard, StopSignal, spawn_status_display,
};
use tracing::{debug, info};

use crate::input;

/// Run the bot until the user quits
pub fn run(config: &BotConfig, offsets: &OffsetTable, overlay: bool) -> Result<()> {
    let signal = Arc::new(StopSignal::new());
    let signal_ctrlc = Arc::clone(&signal);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal, stopping...");
        signal_ctrlc.stop();
    })?;

    let _keyboard_handle = input::spawn_keyboard_monitor(Arc::clone(&signal));

    info!("dashbot {}", env!("CARGO_PKG_VERSION"));

    // Main loop: wait for the game (exits on Ctrl+C, Esc, or q)
    println!("Waiting for Geometry Dash... (Press Esc or q to quit)");
    while !signal.is_stopped() {
        match ProcessHandle::find_and_open() {
            Ok(process) => {
                info!(
                    "Found {} (PID {}, base: {:#x})",
                    GAME_PROCESS_NAME, process.pid, process.base_address
                );

                match play(&process, config, offsets, overlay, &signal) {
                    Ok(()) => {}
                    Err(Error::ProcessExited) => {
                        info!("Game closed, waiting for it to start again...");
                    }
                    // Quit raced with the loop starting
                    Err(e) if e.is_fatal() && signal.is_stopped() => {
                        debug!("Loop ended during shutdown: {}", e);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Err(e) => debug!("{}", e),
        }

        if signal.wait(timing::ATTACH_RETRY) {
            break;
        }
    }

    info!("Shutting down");
    Ok(())
}

/// Drive one attached session until it stops or the game exits
fn play(
    process: &ProcessHandle,
    config: &BotConfig,
    offsets: &OffsetTable,
    overlay: bool,
    signal: &Arc<StopSignal>,
) -> dashbot::Result<()> {
    let reader = MemoryReader::new(process);

    println!(
        "Switch to the game window, starting in {:.1}s...",
        config.startup_delay.as_secs_f32()
    );
    if signal.wait(config.startup_delay) {
        return Ok(());
    }
    if window::focus_game_window(process.pid) {
        debug!("Game window focused");
    }

    if !overlay {
        let mut bot = ControlLoop::with_config(
            &reader,
            process.base_address,
            offsets,
            config.clone(),
            KeyboardInjector::new(),
            NullSink,
            Arc::clone(signal),
        );
        return bot.run();
    }

    let board = Arc::new(StatusBoard::new());
    // Ends with this session, not with the bot
    let display_signal = Arc::new(StopSignal::new());
    let display = spawn_status_display(
        Arc::clone(&board),
        Arc::clone(&display_signal),
        config.display_refresh,
        config.display_rows,
    );

    let mut bot = ControlLoop::with_config(
        &reader,
        process.base_address,
        offsets,
        config.clone(),
        KeyboardInjector::new(),
        board,
        Arc::clone(signal),
    );
    let result = bot.run();

    display_signal.stop();
    if display.join().is_err() {
        debug!("Status display thread panicked");
    }
    result
}
