//! Masking of credentials before text reaches logs or the journal.

use regex::Regex;
use std::sync::OnceLock;

const MASK: &str = "***";

fn bearer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(bearer\s+)[A-Za-z0-9._~+/=-]+").expect("bearer pattern")
    })
}

fn pin_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"("pin"\s*:\s*)"[^"]*""#).expect("pin pattern")
    })
}

/// Mask bearer tokens, JSON `pin` fields and every literal in `secrets`.
pub fn redact(text: &str, secrets: &[&str]) -> String {
    let mut out = bearer_re().replace_all(text, format!("${{1}}{MASK}")).into_owned();
    out = pin_field_re()
        .replace_all(&out, format!("${{1}}\"{MASK}\""))
        .into_owned();

    for secret in secrets.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        out = out.replace(secret, MASK);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_bearer_tokens() {
        let s = redact("header: Bearer abc.DEF-123 sent", &[]);
        assert_eq!(s, "header: Bearer *** sent");
    }

    #[test]
    fn masks_pin_fields() {
        let s = redact(r#"{"tenantId":"t1","pin":"4821"}"#, &[]);
        assert_eq!(s, r#"{"tenantId":"t1","pin":"***"}"#);
    }

    #[test]
    fn masks_literal_secrets_and_ignores_blank_ones() {
        let s = redact("key=sk_live_42 ok", &["sk_live_42", "  "]);
        assert_eq!(s, "key=*** ok");
    }
}
