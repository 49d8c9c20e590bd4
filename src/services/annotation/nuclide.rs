//! Nuclide extraction: runs every surface-form rule and keeps the
//! candidates whose symbol is a real element.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::elements;

use super::rules::{default_rules, NuclideRule};

static DEFAULT_RULES: LazyLock<Vec<Box<dyn NuclideRule>>> = LazyLock::new(default_rules);

/// Extract normalized nuclide identifiers using the built-in rules.
///
/// Output is deduplicated and sorted as strings, so `"100Fm"` precedes
/// `"16O"`.
pub fn extract_nuclides(text: &str) -> Vec<String> {
    extract_nuclides_with(text, &DEFAULT_RULES)
}

/// Extract normalized nuclide identifiers using an explicit rule list.
pub fn extract_nuclides_with(text: &str, rules: &[Box<dyn NuclideRule>]) -> Vec<String> {
    let mut found = BTreeSet::new();
    if text.is_empty() {
        return Vec::new();
    }

    for rule in rules {
        for candidate in rule.candidates(text) {
            if !elements::is_element(candidate.symbol) {
                tracing::trace!(
                    rule = rule.rule_id(),
                    "dropping {}{}: unknown element symbol",
                    candidate.mass,
                    candidate.symbol
                );
                continue;
            }
            if let Some(nuclide) = candidate.normalize() {
                found.insert(nuclide);
            }
        }
    }

    found.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::annotation::rules::RegexRule;

    #[test]
    fn test_empty_text() {
        assert!(extract_nuclides("").is_empty());
    }

    #[test]
    fn test_plain_nuclides() {
        assert_eq!(extract_nuclides("16O, 208Pb"), vec!["16O", "208Pb"]);
    }

    #[test]
    fn test_all_encodings_collapse() {
        let text = "{+16}O $^{16}$O ^{16}O 16O";
        assert_eq!(extract_nuclides(text), vec!["16O"]);
    }

    #[test]
    fn test_string_sort_not_numeric() {
        assert_eq!(extract_nuclides("16O 100Fm"), vec!["100Fm", "16O"]);
    }

    #[test]
    fn test_rejects_non_element_symbols() {
        // "Xx" has symbol shape but is no element.
        assert!(extract_nuclides("{+12}Xx 12Xx").is_empty());
        assert!(extract_nuclides("2024Report").is_empty());
    }

    #[test]
    fn test_greedy_symbol_is_not_shortened() {
        // The symbol group takes the lowercase letter when present; "Cx" is
        // rejected rather than retried as carbon.
        assert!(extract_nuclides("{+12}Cx").is_empty());
    }

    #[test]
    fn test_braced_masses_longer_than_three_digits() {
        // Only the bare form limits the mass to three digits.
        assert_eq!(extract_nuclides("{+1000}U"), vec!["1000U"]);
        assert!(extract_nuclides("1000U").is_empty());
    }

    #[test]
    fn test_nsr_keyword_line() {
        let text = "NUCLEAR REACTIONS {+208}Pb({+48}Ca,2n), E=220 MeV; measured \
                    residues {+254}No, {+255}No.";
        assert_eq!(
            extract_nuclides(text),
            vec!["208Pb", "254No", "255No", "48Ca"]
        );
    }

    #[test]
    fn test_custom_rule_list() {
        let rules: Vec<Box<dyn NuclideRule>> = vec![Box::new(
            RegexRule::new("mass_dash", r"\b([A-Z][a-z]?)-([0-9]+)\b").expect("valid rule"),
        )];
        // Groups are positional: this rule reports the symbol as the mass,
        // so nothing validates.
        assert!(extract_nuclides_with("Pb-208", &rules).is_empty());

        let rules: Vec<Box<dyn NuclideRule>> = vec![Box::new(
            RegexRule::new("mass_dash", r"\b([0-9]+)-([A-Z][a-z]?)\b").expect("valid rule"),
        )];
        assert_eq!(extract_nuclides_with("208-Pb", &rules), vec!["208Pb"]);
    }
}
