use log::{debug, warn};
use tauri::{AppHandle, Emitter, State};

use crate::{
    chores::commands::store_from_state,
    spin::{SpinPlan, SpinState},
    AppState,
};

#[tauri::command]
pub async fn get_spin_state(state: State<'_, AppState>) -> Result<SpinState, String> {
    Ok(state.spin.get_state().await)
}

/// Picks a chore and starts the wheel. Returns `None` when the wheel is
/// already spinning or nothing matches the filters.
///
/// The picked chore is delivered with the `spin-completed` event once the
/// animation time has passed.
#[tauri::command]
pub async fn spin_wheel(
    state: State<'_, AppState>,
    app_handle: AppHandle,
) -> Result<Option<SpinPlan>, String> {
    let sequencer = state.spin.clone();
    let begun = sequencer
        .begin(|| {
            store_from_state(&state)
                .spin()
                .map(|pick| (pick.index, pick.segment_count, pick.chore))
        })
        .await;

    let ticket = match begun {
        Ok(ticket) => ticket,
        Err(reason) => {
            debug!("spin_wheel: {reason}");
            return Ok(None);
        }
    };

    let plan = ticket.plan.clone();
    tauri::async_runtime::spawn(async move {
        match ticket.completed.await {
            Ok(completed) => {
                if let Err(err) = app_handle.emit("spin-completed", &completed) {
                    warn!("Failed to emit spin-completed: {err}");
                }
            }
            Err(_) => warn!("Spin settled without reporting a result"),
        }
    });

    Ok(Some(plan))
}
