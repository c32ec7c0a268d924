//! Scan command: locate the player Y field interactively.

use anyhow::{Result, bail};
use dashbot::{MemoryReader, OffsetScanner, ProcessHandle};
use tracing::info;

use crate::prompter::CliPrompter;

pub fn run() -> Result<()> {
    let process = ProcessHandle::find_and_open()?;
    info!("Scanning from base 0x{:X}", process.base_address);

    let reader = MemoryReader::new(&process);
    let scanner = OffsetScanner::new(&reader, process.base_address);

    let Some(hit) = scanner.find_player_y(&CliPrompter) else {
        bail!("No Y candidate changed between scans");
    };

    println!();
    println!("Player Y candidate:");
    println!("  Address: 0x{:X}", hit.address);
    println!("  Offset:  0x{:X} from module base", hit.offset);
    println!("  Value:   {:.1} -> {:.1}", hit.before, hit.after);
    println!();
    println!("Note: this is a static address. Set \"player_y\" in the offsets");
    println!("file only after confirming it as a field offset of the player.");

    Ok(())
}
