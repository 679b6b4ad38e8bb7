use crate::backend::{BackendError, HttpBackend, KioskBackend};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::tenant::normalize_store_code;
use crate::ui::messages::{error, success};

/// Resolve `code` once against the configured API, without starting the kiosk.
pub fn handle(code: &str, cfg: &Config) -> AppResult<()> {
    let Some(code) = normalize_store_code(code) else {
        return Err(AppError::Other(format!(
            "'{code}' is not a valid store code (letters and numbers only)"
        )));
    };

    let api_key = cfg.api_key.as_deref();
    let backend = HttpBackend::new(cfg.require_api_url()?, api_key, cfg.request_timeout())?;

    match backend.verify_store(&code) {
        Ok(tenant) => {
            success(format!("{code} → {}", tenant.tenant_name));
            println!("tenant_id: {}", tenant.tenant_id);
            if let Some(logo) = tenant.logo_url {
                println!("logo_url:  {logo}");
            }
            Ok(())
        }
        Err(BackendError::NotFound) => {
            error(format!("Store {code} not found"));
            Err(BackendError::NotFound.into())
        }
        Err(e) => Err(e.into()),
    }
}
