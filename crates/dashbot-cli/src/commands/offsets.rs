//! Offsets command: write the built-in offset table.

use std::path::Path;

use anyhow::Result;
use dashbot::{OffsetTable, save_offsets};

pub fn run(output: &Path) -> Result<()> {
    let offsets = OffsetTable::default();
    save_offsets(output, &offsets)?;

    println!("Offsets written to {}", output.display());
    println!("  Version:       {}", offsets.version);
    println!("  Pointer width: {} bytes", offsets.pointer_width.bytes());
    println!("  PlayLayer:     0x{:X}", offsets.playlayer);

    Ok(())
}
