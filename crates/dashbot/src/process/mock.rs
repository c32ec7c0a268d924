//! In-memory stand-in for a foreign process, for tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::process::ReadMemory;

/// Sparse fake address space.
///
/// Each write creates a region; reads must fall entirely inside one region.
#[derive(Debug)]
pub struct MockMemoryReader {
    regions: RefCell<BTreeMap<u64, Vec<u8>>>,
    attached: Cell<bool>,
    reads: Cell<usize>,
}

impl MockMemoryReader {
    pub fn new() -> Self {
        Self {
            regions: RefCell::new(BTreeMap::new()),
            attached: Cell::new(true),
            reads: Cell::new(0),
        }
    }

    /// Simulate the target process going away.
    pub fn detach(&self) {
        self.attached.set(false);
    }

    /// Number of `read_bytes` calls served so far (successful or not).
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    /// Change memory after construction, as the game would between reads.
    pub fn poke(&self, address: u64, data: &[u8]) {
        let mut regions = self.regions.borrow_mut();
        // Overwrite in place when the write lands inside an existing region
        if let Some((&base, region)) = regions.range_mut(..=address).next_back() {
            let offset = (address - base) as usize;
            if offset + data.len() <= region.len() {
                region[offset..offset + data.len()].copy_from_slice(data);
                return;
            }
        }
        regions.insert(address, data.to_vec());
    }
}

impl Default for MockMemoryReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, len: usize) -> Result<Vec<u8>> {
        self.reads.set(self.reads.get() + 1);

        if !self.attached.get() {
            return Err(Error::read_failed(address, "process detached"));
        }

        let regions = self.regions.borrow();
        for (&base, data) in regions.range(..=address).rev() {
            let offset = (address - base) as usize;
            if offset + len <= data.len() {
                return Ok(data[offset..offset + len].to_vec());
            }
        }

        Err(Error::read_failed(address, "unmapped"))
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

/// Builder for [`MockMemoryReader`]
#[derive(Debug, Default)]
pub struct MockMemoryBuilder {
    reader: MockMemoryReader,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self {
            reader: MockMemoryReader::new(),
        }
    }

    pub fn write_bytes(self, address: u64, data: &[u8]) -> Self {
        self.reader.poke(address, data);
        self
    }

    pub fn write_i32(self, address: u64, value: i32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u32(self, address: u64, value: u32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u64(self, address: u64, value: u64) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_f32(self, address: u64, value: f32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    /// Write a 32-bit pointer
    pub fn write_ptr(self, address: u64, target: u32) -> Self {
        self.write_u32(address, target)
    }

    pub fn build(self) -> MockMemoryReader {
        self.reader
    }
}
