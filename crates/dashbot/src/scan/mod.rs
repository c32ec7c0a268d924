//! Interactive scan for the player Y field.
//!
//! Two passes over the module image: the first records every plausible Y
//! coordinate, the second (after the user has moved the player) keeps the
//! first one that changed significantly. The hit's offset from the module
//! base is what goes into the offset table.

use tracing::{debug, info};

use crate::process::ReadMemory;

/// Bytes scanned from the module base
pub const DEFAULT_SCAN_LENGTH: u64 = 0x100_0000;
/// Bytes per read
pub const SCAN_CHUNK_SIZE: usize = 0x1_0000;
/// Exclusive bounds for a plausible Y coordinate
pub const Y_RANGE: (f32, f32) = (0.0, 1000.0);
/// Minimum change between passes to count as "moved"
pub const MIN_CHANGE: f32 = 10.0;

const VALUE_SIZE: usize = 4;

/// User interaction during a scan
pub trait ScanPrompter {
    /// Show a message and wait until the user is ready
    fn prompt_continue(&self, message: &str);

    fn display_message(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanCandidate {
    pub address: u64,
    pub value: f32,
}

/// A field that changed between passes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanHit {
    pub address: u64,
    /// Offset from the module base
    pub offset: u64,
    pub before: f32,
    pub after: f32,
}

pub struct OffsetScanner<'a, R: ReadMemory + ?Sized> {
    reader: &'a R,
    base: u64,
    length: u64,
}

impl<'a, R: ReadMemory + ?Sized> OffsetScanner<'a, R> {
    pub fn new(reader: &'a R, base: u64) -> Self {
        Self::with_length(reader, base, DEFAULT_SCAN_LENGTH)
    }

    pub fn with_length(reader: &'a R, base: u64, length: u64) -> Self {
        Self {
            reader,
            base,
            length,
        }
    }

    /// Run both passes, prompting in between
    pub fn find_player_y<P: ScanPrompter + ?Sized>(&self, prompter: &P) -> Option<ScanHit> {
        prompter.display_message("Move player up/down to find Y offset...");
        prompter.prompt_continue("Press Enter when ready to scan...");

        let candidates = self.collect_candidates();
        prompter.display_message(&format!("Found {} potential addresses", candidates.len()));
        if candidates.is_empty() {
            return None;
        }

        prompter.prompt_continue("Move player and press Enter to rescan...");
        let hit = self.find_changed(&candidates);
        if let Some(hit) = hit {
            info!(
                "Y candidate at 0x{:X} ({} -> {})",
                hit.offset, hit.before, hit.after
            );
        }
        hit
    }

    /// First pass: every aligned f32 inside [`Y_RANGE`]
    pub fn collect_candidates(&self) -> Vec<ScanCandidate> {
        let mut candidates = Vec::new();
        self.for_each_chunk(|chunk_base, bytes| {
            for (address, value) in aligned_values(chunk_base, bytes) {
                if Y_RANGE.0 < value && value < Y_RANGE.1 {
                    candidates.push(ScanCandidate { address, value });
                }
            }
        });
        debug!("Scan pass 1: {} candidates", candidates.len());
        candidates
    }

    /// Second pass: the lowest-addressed candidate that moved by more than [`MIN_CHANGE`]
    pub fn find_changed(&self, candidates: &[ScanCandidate]) -> Option<ScanHit> {
        for candidate in candidates {
            let Ok(after) = self.reader.read_f32(candidate.address) else {
                continue;
            };
            if (after - candidate.value).abs() > MIN_CHANGE {
                return Some(ScanHit {
                    address: candidate.address,
                    offset: candidate.address - self.base,
                    before: candidate.value,
                    after,
                });
            }
        }
        None
    }

    fn for_each_chunk<F: FnMut(u64, &[u8])>(&self, mut f: F) {
        let end = self.base.saturating_add(self.length);
        let mut chunk_base = self.base;
        while chunk_base < end {
            let len = (end - chunk_base).min(SCAN_CHUNK_SIZE as u64) as usize;
            match self.reader.read_bytes(chunk_base, len) {
                Ok(bytes) => f(chunk_base, &bytes),
                // Unmapped or guarded pages: nothing to find there
                Err(e) => debug!("Skipping chunk at 0x{:X}: {}", chunk_base, e),
            }
            chunk_base += len as u64;
        }
    }
}

fn aligned_values(base: u64, bytes: &[u8]) -> impl Iterator<Item = (u64, f32)> + '_ {
    bytes
        .chunks_exact(VALUE_SIZE)
        .enumerate()
        .map(move |(i, b)| {
            (
                base + (i * VALUE_SIZE) as u64,
                f32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            )
        })
}
