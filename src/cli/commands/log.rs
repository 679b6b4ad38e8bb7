use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::journal::print_journal;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        info("Nothing to do. Use `log --print` to show the journal.");
        return Ok(());
    }

    let path = cfg.journal_path();
    if !path.exists() {
        info(format!(
            "No journal at {} (run `punchkiosk init` first)",
            path.display()
        ));
        return Ok(());
    }

    let pool = DbPool::new(&path)?;
    init_db(&pool.conn)?;
    print_journal(&pool.conn)
}
