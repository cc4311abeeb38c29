use serde::{Deserialize, Serialize};

/// A literal find/replace applied to address text before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    pub pattern: String,
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Street abbreviations and unit markers that trip up geocoders.
pub fn default_rules() -> Vec<SubstitutionRule> {
    vec![
        SubstitutionRule::new(" St.", " Street"),
        SubstitutionRule::new(" Ave.", " Avenue"),
        SubstitutionRule::new(" Blvd.", " Boulevard"),
        SubstitutionRule::new(" Rd.", " Road"),
        SubstitutionRule::new(" Dr.", " Drive"),
        SubstitutionRule::new(" Hwy", " Highway"),
        SubstitutionRule::new("#", "Unit "),
    ]
}

/// Applies `rules` in order, then trims and collapses runs of whitespace.
pub fn clean_address(raw: &str, rules: &[SubstitutionRule]) -> String {
    let substituted = rules
        .iter()
        .filter(|rule| !rule.pattern.is_empty())
        .fold(raw.to_string(), |text, rule| text.replace(&rule.pattern, &rule.replacement));

    substituted.split_whitespace().collect::<Vec<_>>().join(" ")
}
