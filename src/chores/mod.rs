#[cfg(feature = "desktop")]
pub(crate) mod commands;
pub mod dataset;
pub mod filters;
pub mod model;
pub mod store;
pub mod wheel;

pub use filters::{apply_filters, FilterState, FilterUpdate};
pub use model::{Chore, ChoreDraft, ChoreOrigin, ChoreType, CountRange, Difficulty};
pub use store::{ChoreSnapshot, ChoreStore, Pick, CUSTOM_CHORES_KEY, RECENT_CHORES_KEY};
pub use wheel::{wheel_segments, WheelSegment};

#[derive(Debug, thiserror::Error)]
pub enum ChoreError {
    #[error("failed to load the bundled chore list: {0}")]
    Dataset(#[source] serde_json::Error),
    #[error("chore name must not be empty")]
    EmptyName,
    #[error("chore {field} is longer than {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
}
