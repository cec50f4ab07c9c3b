pub mod chores;
pub mod settings;
pub mod spin;
pub mod storage;
pub mod utils;

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use std::sync::Mutex;

    use log::{info, warn};
    use tauri::{Emitter, Manager, State};

    use crate::{
        chores::{
            commands::{
                add_custom_chore, clear_recent_chores, get_chore_snapshot, get_filtered_chores,
                get_wheel_segments, remove_custom_chore, set_chore_filter,
            },
            ChoreStore,
        },
        settings::{SettingsStore, UiSettings},
        spin::{
            commands::{get_spin_state, spin_wheel},
            SpinSequencer,
        },
        storage::SqliteStore,
        utils::logging,
    };

    pub(crate) struct AppState {
        pub(crate) chores: Mutex<ChoreStore<SqliteStore>>,
        pub(crate) spin: SpinSequencer,
        pub(crate) settings: SettingsStore,
    }

    #[tauri::command]
    fn get_ui_settings(state: State<AppState>) -> Result<UiSettings, String> {
        Ok(state.settings.ui())
    }

    #[tauri::command]
    fn set_ui_settings(
        settings: UiSettings,
        state: State<AppState>,
        app_handle: tauri::AppHandle,
    ) -> Result<UiSettings, String> {
        let saved = state
            .settings
            .update_ui(settings)
            .map_err(|e| e.to_string())?;

        app_handle
            .emit("ui-settings-updated", &saved)
            .map_err(|e| e.to_string())?;

        Ok(saved)
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        logging::init();

        info!("Chore wheel starting up...");

        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .setup(|app| {
                let result = (|| -> anyhow::Result<()> {
                    let app_data_dir = app
                        .path()
                        .app_data_dir()
                        .map_err(|err| anyhow::anyhow!(err))?;
                    std::fs::create_dir_all(&app_data_dir)?;

                    let kv = SqliteStore::open(app_data_dir.join("chore-wheel.sqlite3"))?;
                    let chores = ChoreStore::load(kv)?;
                    if let Some(err) = chores.persistence_error() {
                        warn!("Starting without saved chores: {err}");
                    }

                    let settings = SettingsStore::new(app_data_dir.join("settings.json"))?;
                    let spin = SpinSequencer::from_env();
                    info!("Spin animation lasts {} ms", spin.duration().as_millis());

                    app.manage(AppState {
                        chores: Mutex::new(chores),
                        spin,
                        settings,
                    });

                    Ok(())
                })();

                result.map_err(|err| err.into())
            })
            .invoke_handler(tauri::generate_handler![
                get_chore_snapshot,
                get_filtered_chores,
                get_wheel_segments,
                add_custom_chore,
                remove_custom_chore,
                clear_recent_chores,
                set_chore_filter,
                get_spin_state,
                spin_wheel,
                get_ui_settings,
                set_ui_settings,
            ])
            .run(tauri::generate_context!())
            .expect("error while running tauri application");
    }
}

#[cfg(feature = "desktop")]
pub(crate) use desktop::AppState;
