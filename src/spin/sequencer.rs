use std::{sync::Arc, time::Duration};

use chrono::Utc;
use log::{debug, info};
use serde::Serialize;
use tokio::{
    sync::{oneshot, Mutex},
    time,
};
use uuid::Uuid;

use super::{SpinState, SpinStatus};

/// Matches the CSS transition on the wheel.
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpinRejected {
    #[error("the wheel is already spinning")]
    AlreadySpinning,
    #[error("no chores match the current filters")]
    NothingToSpin,
}

/// What the frontend needs to animate one spin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinPlan {
    pub spin_id: String,
    pub target_index: usize,
    pub segment_count: usize,
    pub from_rotation: f64,
    pub target_rotation: f64,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinCompleted<T> {
    pub spin_id: String,
    pub rest_rotation: f64,
    pub result: T,
}

pub struct SpinTicket<T> {
    pub plan: SpinPlan,
    /// Resolves once, when the animation time has elapsed and the wheel is idle again.
    pub completed: oneshot::Receiver<SpinCompleted<T>>,
}

#[derive(Clone)]
pub struct SpinSequencer {
    state: Arc<Mutex<SpinState>>,
    duration: Duration,
}

impl SpinSequencer {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SpinState::new())),
            duration,
        }
    }

    /// Uses `CHORE_WHEEL_SPIN_MS` when set to a valid number of milliseconds.
    pub fn from_env() -> Self {
        let duration = std::env::var("CHORE_WHEEL_SPIN_MS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SPIN_DURATION);
        Self::new(duration)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub async fn get_state(&self) -> SpinState {
        self.state.lock().await.clone()
    }

    /// Starts a spin if the wheel is idle.
    ///
    /// `pick` runs only when the spin is allowed and must return the picked
    /// segment index, the segment count and the result to report on completion.
    /// It is the single source of randomness for the spin.
    pub async fn begin<T, F>(&self, pick: F) -> Result<SpinTicket<T>, SpinRejected>
    where
        T: Send + 'static,
        F: FnOnce() -> Option<(usize, usize, T)>,
    {
        let (plan, result) = {
            let mut state = self.state.lock().await;
            if state.status != SpinStatus::Idle {
                debug!("Spin ignored: already spinning");
                return Err(SpinRejected::AlreadySpinning);
            }

            let Some((index, segment_count, result)) = pick() else {
                debug!("Spin ignored: nothing to pick from");
                return Err(SpinRejected::NothingToSpin);
            };

            let spin_id = Uuid::new_v4().to_string();
            let from_rotation = state.rotation;
            let duration_ms = self.duration.as_millis() as u64;
            let target_rotation =
                state.begin(spin_id.clone(), index, segment_count, duration_ms, Utc::now());

            info!(
                "Spin {} started: segment {} of {}, {:.1}° -> {:.1}°",
                spin_id, index, segment_count, from_rotation, target_rotation
            );

            (
                SpinPlan {
                    spin_id,
                    target_index: index,
                    segment_count,
                    from_rotation,
                    target_rotation,
                    duration_ms,
                },
                result,
            )
        };

        let (completed_tx, completed_rx) = oneshot::channel();
        self.spawn_settle(plan.spin_id.clone(), result, completed_tx);

        Ok(SpinTicket {
            plan,
            completed: completed_rx,
        })
    }

    fn spawn_settle<T: Send + 'static>(
        &self,
        spin_id: String,
        result: T,
        completed_tx: oneshot::Sender<SpinCompleted<T>>,
    ) {
        let state = self.state.clone();
        let duration = self.duration;

        tokio::spawn(async move {
            time::sleep(duration).await;

            let rest_rotation = {
                let mut guard = state.lock().await;
                guard.finish()
            };
            info!("Spin {} settled at {:.1}°", spin_id, rest_rotation);

            let _ = completed_tx.send(SpinCompleted {
                spin_id,
                rest_rotation,
                result,
            });
        });
    }
}
