mod handle;
mod reader;

#[cfg(test)]
pub mod mock;

pub use handle::*;
pub use reader::{PointerWidth, ReadMemory, RemoteMemory};

#[cfg(test)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
