use crate::backend::HttpBackend;
use crate::config::Config;
use crate::core::machine::KioskMachine;
use crate::core::runtime::KioskRuntime;
use crate::core::session_clock::SystemClock;
use crate::core::wake_lock::WakeLockManager;
use crate::db::initialize::open_journal;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, BufReader};
use std::time::Instant;
use tracing::info;

/// Run the kiosk on this terminal until stdin closes or `q` is entered.
pub fn handle(cfg: &Config, plain: bool) -> AppResult<()> {
    let backend = HttpBackend::new(
        cfg.require_api_url()?,
        cfg.api_key.as_deref(),
        cfg.request_timeout(),
    )?;

    let machine = KioskMachine::new(backend, Box::new(SystemClock), Instant::now());
    let secrets = cfg.secrets().into_iter().map(str::to_string).collect();
    let mut runtime = KioskRuntime::new(machine, WakeLockManager::detect()).with_secrets(secrets);

    match open_journal(&cfg.journal_path()) {
        Ok(conn) => runtime = runtime.with_journal(conn),
        Err(e) => warning(format!("Journal unavailable, running without it: {e}")),
    }
    if plain {
        runtime = runtime.without_screen_clear();
    }

    if let Some(code) = cfg.store_code() {
        info!(code, "resolving preconfigured store");
        runtime.preload_store(code);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    runtime.run(BufReader::new(io::stdin()), &mut out)
}
