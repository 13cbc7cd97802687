pub mod score;
pub mod snapshot;
pub mod state;

pub use score::*;
pub use snapshot::*;
pub use state::*;
