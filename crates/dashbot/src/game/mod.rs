mod decision;
mod locator;
mod snapshot;
mod state;

pub use decision::*;
pub use locator::*;
pub use snapshot::*;
pub use state::*;
