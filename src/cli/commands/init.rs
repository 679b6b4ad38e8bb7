use crate::config::Config;
use crate::db::initialize::open_journal;
use crate::db::journal;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// Handle the `init` command
///
/// This creates:
///  - the configuration file, unless one already exists
///  - the journal database with its schema
pub fn handle(config_path: &Path, cfg: &Config) -> AppResult<()> {
    if config_path.exists() {
        info(format!(
            "Config file already present: {}",
            config_path.display()
        ));
    } else {
        cfg.write_to(config_path)?;
        success(format!("Config file: {}", config_path.display()));
    }

    let journal_path = cfg.journal_path();
    let conn = open_journal(&journal_path)?;
    success(format!("Journal:     {}", journal_path.display()));

    if let Err(e) = journal::record(
        &conn,
        "init",
        "",
        &format!("Journal initialized at {}", journal_path.display()),
    ) {
        warning(format!("Failed to write journal entry: {e}"));
    }

    if cfg.api_base_url.trim().is_empty() {
        info("Set api_base_url with `punchkiosk config --edit` before starting the kiosk.");
    }

    Ok(())
}
