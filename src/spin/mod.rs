#[cfg(feature = "desktop")]
pub(crate) mod commands;
pub mod geometry;
pub mod sequencer;
pub mod state;

pub use sequencer::{SpinCompleted, SpinPlan, SpinRejected, SpinSequencer, SpinTicket};
pub use state::{SpinState, SpinStatus};
