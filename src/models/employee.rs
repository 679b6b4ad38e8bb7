use serde::{Deserialize, Serialize};

/// Identity pool an employee belongs to.
///
/// Staff accounts and tip-roster employees share the PIN and punch mechanism
/// but are different records upstream, so every hours or clock-in call must
/// carry the source along with the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeSource {
    Staff,
    TipRoster,
}

impl EmployeeSource {
    /// Convert enum → wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeSource::Staff => "staff",
            EmployeeSource::TipRoster => "tip_roster",
        }
    }
}

/// Fields both identity pools guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    pub id: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub role: Option<String>,
}

/// Employee authenticated at the kiosk, tagged by identity pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeIdentity {
    Staff(EmployeeProfile),
    TipRoster(EmployeeProfile),
}

impl EmployeeIdentity {
    pub fn new(source: EmployeeSource, profile: EmployeeProfile) -> Self {
        match source {
            EmployeeSource::Staff => EmployeeIdentity::Staff(profile),
            EmployeeSource::TipRoster => EmployeeIdentity::TipRoster(profile),
        }
    }

    pub fn source(&self) -> EmployeeSource {
        match self {
            EmployeeIdentity::Staff(_) => EmployeeSource::Staff,
            EmployeeIdentity::TipRoster(_) => EmployeeSource::TipRoster,
        }
    }

    pub fn profile(&self) -> &EmployeeProfile {
        match self {
            EmployeeIdentity::Staff(p) | EmployeeIdentity::TipRoster(p) => p,
        }
    }

    pub fn id(&self) -> &str {
        &self.profile().id
    }

    pub fn full_name(&self) -> &str {
        &self.profile().full_name
    }

    /// First word of the full name, used for greetings.
    pub fn first_name(&self) -> &str {
        self.full_name()
            .split_whitespace()
            .next()
            .unwrap_or_else(|| self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_wire_names() {
        for source in [EmployeeSource::Staff, EmployeeSource::TipRoster] {
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, format!("\"{}\"", source.as_str()));
        }
    }

    #[test]
    fn first_name_falls_back_to_full_name() {
        let who = EmployeeIdentity::new(
            EmployeeSource::TipRoster,
            EmployeeProfile {
                id: "e1".into(),
                full_name: "Marisol Vega".into(),
                avatar_url: None,
                role: None,
            },
        );
        assert_eq!(who.first_name(), "Marisol");
        assert_eq!(who.source(), EmployeeSource::TipRoster);
    }
}
