use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};

/// Size of a pointer in the target process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerWidth {
    /// 32-bit target (the GD 2.2 offset table assumes this)
    #[default]
    W32,
    W64,
}

impl PointerWidth {
    pub const fn bytes(self) -> u64 {
        match self {
            Self::W32 => 4,
            Self::W64 => 8,
        }
    }
}

/// Read access to a foreign address space.
///
/// Every provided method performs exactly one bounded read through
/// [`ReadMemory::read_bytes`].
pub trait ReadMemory {
    fn read_bytes(&self, address: u64, len: usize) -> Result<Vec<u8>>;

    /// Whether the target is still there to be read from.
    fn is_attached(&self) -> bool {
        true
    }

    fn read_i32(&self, address: u64) -> Result<i32> {
        Ok(i32::from_le_bytes(read_array(self, address)?))
    }

    fn read_u32(&self, address: u64) -> Result<u32> {
        Ok(u32::from_le_bytes(read_array(self, address)?))
    }

    fn read_u64(&self, address: u64) -> Result<u64> {
        Ok(u64::from_le_bytes(read_array(self, address)?))
    }

    fn read_f32(&self, address: u64) -> Result<f32> {
        Ok(f32::from_le_bytes(read_array(self, address)?))
    }

    fn read_pointer(&self, address: u64, width: PointerWidth) -> Result<u64> {
        match width {
            PointerWidth::W32 => self.read_u32(address).map(u64::from),
            PointerWidth::W64 => self.read_u64(address),
        }
    }
}

fn read_array<R: ReadMemory + ?Sized, const N: usize>(reader: &R, address: u64) -> Result<[u8; N]> {
    let bytes = reader.read_bytes(address, N)?;
    bytes
        .get(..N)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| Error::read_failed(address, format!("short read ({} of {N} bytes)", bytes.len())))
}

/// Fault-tolerant view over a [`ReadMemory`].
///
/// Read failures collapse to the type's zero value here and nowhere else.
/// A zero pointer coming out of this layer means "entity absent" whether the
/// slot really held zero or the read failed.
pub struct RemoteMemory<'a, R: ReadMemory + ?Sized> {
    reader: &'a R,
    pointer_width: PointerWidth,
}

impl<'a, R: ReadMemory + ?Sized> RemoteMemory<'a, R> {
    pub fn new(reader: &'a R, pointer_width: PointerWidth) -> Self {
        Self {
            reader,
            pointer_width,
        }
    }

    pub fn pointer_width(&self) -> PointerWidth {
        self.pointer_width
    }

    /// The fallible reader underneath, for callers that need to tell a
    /// failed read apart from a zero.
    pub fn inner(&self) -> &'a R {
        self.reader
    }

    pub fn read_f32(&self, address: u64) -> f32 {
        degrade(self.reader.read_f32(address), address)
    }

    pub fn read_i32(&self, address: u64) -> i32 {
        degrade(self.reader.read_i32(address), address)
    }

    pub fn read_pointer(&self, address: u64) -> u64 {
        degrade(self.reader.read_pointer(address, self.pointer_width), address)
    }
}

fn degrade<T: Default>(result: Result<T>, address: u64) -> T {
    result.unwrap_or_else(|e| {
        trace!("Read at {:#x} degraded to default: {}", address, e);
        T::default()
    })
}
