use std::sync::MutexGuard;

use tauri::State;

use crate::{
    chores::{Chore, ChoreDraft, ChoreSnapshot, ChoreStore, FilterUpdate, WheelSegment},
    storage::SqliteStore,
    AppState,
};

pub(crate) fn store_from_state<'a>(
    state: &'a State<'_, AppState>,
) -> MutexGuard<'a, ChoreStore<SqliteStore>> {
    state
        .chores
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[tauri::command]
pub fn get_chore_snapshot(state: State<'_, AppState>) -> Result<ChoreSnapshot, String> {
    Ok(store_from_state(&state).snapshot())
}

#[tauri::command]
pub fn get_filtered_chores(state: State<'_, AppState>) -> Result<Vec<Chore>, String> {
    Ok(store_from_state(&state).filtered())
}

#[tauri::command]
pub fn get_wheel_segments(state: State<'_, AppState>) -> Result<Vec<WheelSegment>, String> {
    let filtered = store_from_state(&state).filtered();
    Ok(crate::chores::wheel_segments(&filtered))
}

#[tauri::command]
pub fn add_custom_chore(
    state: State<'_, AppState>,
    draft: ChoreDraft,
) -> Result<ChoreSnapshot, String> {
    let mut store = store_from_state(&state);
    store.add_custom_draft(draft).map_err(|e| e.to_string())?;
    Ok(store.snapshot())
}

#[tauri::command]
pub fn remove_custom_chore(
    state: State<'_, AppState>,
    name: String,
) -> Result<ChoreSnapshot, String> {
    let mut store = store_from_state(&state);
    store.remove_custom_chore(&name);
    Ok(store.snapshot())
}

#[tauri::command]
pub fn clear_recent_chores(state: State<'_, AppState>) -> Result<ChoreSnapshot, String> {
    let mut store = store_from_state(&state);
    store.clear_recent();
    Ok(store.snapshot())
}

#[tauri::command]
pub fn set_chore_filter(
    state: State<'_, AppState>,
    update: FilterUpdate,
) -> Result<ChoreSnapshot, String> {
    let mut store = store_from_state(&state);
    store.set_filter(update);
    Ok(store.snapshot())
}
