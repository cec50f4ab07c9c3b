//! Logger setup.
//!
//! Everything logs through the `log` macros; `env_logger` prints them. The
//! default level is `info`, and `RUST_LOG` overrides it, e.g.
//! `RUST_LOG=chore_wheel_lib=debug` to see individual picks.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the global logger. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or("info");
        if let Err(err) = env_logger::Builder::from_env(env).try_init() {
            eprintln!("Logger already installed: {err}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init();
        init();
        log::info!("logger initialized");
    }
}
