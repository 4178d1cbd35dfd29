//! Rule sets built from defaults or configuration.

use crate::PluginMethod;
use interceptor_lint_core::{Config, RuleBox};

/// Returns all available rules with default options.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(PluginMethod::new())]
}

/// Returns all available rules, reading options from `config`.
///
/// Enabling and severity are applied by the analyzer; this only wires
/// rule-specific options such as `exclude`.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    vec![Box::new(PluginMethod::from_config(
        config.rule(crate::plugin_method::NAME),
    ))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_have_unique_names() {
        let rules = all_rules();
        let mut names: Vec<_> = rules.iter().map(|r| r.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), rules.len());
    }

    #[test]
    fn test_rules_from_empty_config() {
        let rules = rules_from_config(&Config::default());
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].code(), "PluginError");
    }
}
