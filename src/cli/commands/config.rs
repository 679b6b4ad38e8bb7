use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        print(cfg, path)?;
    }

    if *check {
        let missing = Config::missing_fields(path)?;
        if missing.is_empty() {
            success(format!("{} is complete", path.display()));
        } else {
            warning(format!(
                "{} does not set: {}",
                path.display(),
                missing.join(", ")
            ));
        }
    }

    if *edit_config {
        edit(path, editor.as_deref())?;
    }

    Ok(())
}

/// Effective configuration with the API key masked.
fn print(cfg: &Config, path: &Path) -> AppResult<()> {
    let mut shown = cfg.clone();
    if shown.api_key.is_some() {
        shown.api_key = Some("***".to_string());
    }

    header(path.display());
    println!("{}", serde_yaml::to_string(&shown)?);
    Ok(())
}

fn edit(path: &Path, requested: Option<&str>) -> AppResult<()> {
    if !path.exists() {
        Config::default().write_to(path)?;
    }

    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor = requested.map(str::to_string).unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor).arg(path).status() {
        Ok(s) if s.success() => {
            success(format!("Configuration edited with '{editor}'"));
            return Ok(());
        }
        _ if editor != default_editor => {
            warning(format!(
                "Editor '{editor}' not available, falling back to '{default_editor}'"
            ));
        }
        _ => {
            error(format!("Failed to edit configuration with '{editor}'"));
            return Ok(());
        }
    }

    match Command::new(&default_editor).arg(path).status() {
        Ok(s) if s.success() => success(format!(
            "Configuration edited with fallback '{default_editor}'"
        )),
        _ => error(format!(
            "Failed to edit configuration with fallback '{default_editor}'"
        )),
    }

    Ok(())
}
