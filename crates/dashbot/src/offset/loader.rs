use std::fs;
use std::path::Path;

use tracing::debug;

use super::OffsetTable;
use crate::error::{Error, Result};

/// Load an offset table from a JSON file
pub fn load_offsets<P: AsRef<Path>>(path: P) -> Result<OffsetTable> {
    let content = fs::read_to_string(path.as_ref())?;
    let table: OffsetTable = serde_json::from_str(&content)?;

    if !table.is_valid() {
        return Err(Error::InvalidOffset(format!(
            "{}: missing version or playlayer",
            path.as_ref().display()
        )));
    }

    debug!(
        "Loaded offsets {} (playlayer=0x{:X})",
        table.version, table.playlayer
    );
    Ok(table)
}

/// Save an offset table as pretty-printed JSON
pub fn save_offsets<P: AsRef<Path>>(path: P, table: &OffsetTable) -> Result<()> {
    let content = serde_json::to_string_pretty(table)?;
    fs::write(path, content)?;
    Ok(())
}
