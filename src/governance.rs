//! Governance: a deny-list check applied to actions before they are recorded.

/// Substring deny-list over produced actions.
#[derive(Debug, Clone)]
pub struct Governance {
    forbidden: Vec<String>,
}

impl Default for Governance {
    fn default() -> Self {
        Self {
            forbidden: ["harm", "illegal", "exploit"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Governance {
    /// Governance with a custom deny-list (terms are matched lowercased).
    pub fn with_terms(terms: impl IntoIterator<Item = String>) -> Self {
        Self {
            forbidden: terms.into_iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Whether the action passes the deny-list.
    pub fn approves(&self, action: &str) -> bool {
        let lower = action.to_lowercase();
        !self.forbidden.iter().any(|term| lower.contains(term))
    }
}

/// Replacement action recorded when governance vetoes the original.
pub const VETOED_ACTION: &str = "Action withheld by governance policy.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_actions_approved() {
        let gov = Governance::default();
        assert!(gov.approves("Creative energy detected."));
    }

    #[test]
    fn forbidden_terms_vetoed_case_insensitively() {
        let gov = Governance::default();
        assert!(!gov.approves("Exploit the system"));
        assert!(!gov.approves("this could HARM someone"));
    }

    #[test]
    fn custom_terms() {
        let gov = Governance::with_terms(vec!["Delete".to_string()]);
        assert!(!gov.approves("delete everything"));
        assert!(gov.approves("harmless"));
    }
}
