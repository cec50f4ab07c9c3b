use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geometry::{normalize_rotation, target_rotation};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SpinStatus {
    #[default]
    Idle,
    Spinning,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SpinState {
    pub status: SpinStatus,
    pub spin_id: Option<String>,
    /// Current wheel rotation in degrees; the target while spinning.
    pub rotation: f64,
    pub target_index: Option<usize>,
    pub segment_count: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub duration_ms: u64,
}

impl SpinState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to `Spinning` and returns the rotation the wheel should animate to.
    pub fn begin(
        &mut self,
        spin_id: String,
        index: usize,
        segment_count: usize,
        duration_ms: u64,
        now: DateTime<Utc>,
    ) -> f64 {
        let target = target_rotation(self.rotation, index, segment_count);
        *self = Self {
            status: SpinStatus::Spinning,
            spin_id: Some(spin_id),
            rotation: target,
            target_index: Some(index),
            segment_count,
            started_at: Some(now),
            duration_ms,
        };
        target
    }

    /// Back to `Idle`; keeps the rest rotation (normalized) and returns it.
    pub fn finish(&mut self) -> f64 {
        self.status = SpinStatus::Idle;
        self.rotation = normalize_rotation(self.rotation);
        self.started_at = None;
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.status == SpinStatus::Spinning
    }
}
