use serde::{Deserialize, Serialize};

/// Store identity resolved from an operator-entered store code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    pub tenant_id: String,
    pub tenant_name: String,
    pub logo_url: Option<String>,
}

/// Normalize an operator-entered store code.
///
/// Returns `None` when the code is empty or contains anything other than
/// ASCII letters and digits.
pub fn normalize_store_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_uppercase();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(code)
}
