//! KeywordAnnotator: nuclides, reactions, and atomic numbers for one
//! keyword string.

use crate::config::AnnotationConfig;
use crate::elements;

use super::nuclide::extract_nuclides_with;
use super::reaction::extract_reactions;
use super::resolver::resolve_all;
use super::rules::{default_rules, NuclideRule, BARE_RULE_ID};
use super::types::{AnnotationError, AnnotationResult};

/// Annotates NSR keyword strings.
///
/// Holds an ordered list of nuclide rules. Defaults to the four NSR surface
/// forms; extra forms can be appended with `with_rule()` without touching
/// validation or deduplication. Safe to share across tasks.
pub struct KeywordAnnotator {
    rules: Vec<Box<dyn NuclideRule>>,
}

impl KeywordAnnotator {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Build the default annotator after checking the element table.
    pub fn try_new() -> Result<Self, AnnotationError> {
        elements::validate()?;
        Ok(Self::new())
    }

    /// Build an annotator from configuration, checking the element table.
    pub fn from_config(config: &AnnotationConfig) -> Result<Self, AnnotationError> {
        let mut annotator = Self::try_new()?;
        if !config.bare_mass_numbers {
            annotator.rules.retain(|r| r.rule_id() != BARE_RULE_ID);
        }
        tracing::debug!(rules = ?annotator.rule_ids(), "keyword annotator ready");
        Ok(annotator)
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: Box<dyn NuclideRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Identifiers of the active rules, in application order.
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.rule_id()).collect()
    }

    /// Annotate one keyword string. Absent text is treated as empty.
    ///
    /// Never fails: text that matches nothing yields an empty result.
    pub fn annotate(&self, text: Option<&str>) -> AnnotationResult {
        let text = text.unwrap_or("");
        let nuclides = extract_nuclides_with(text, &self.rules);
        let reactions = extract_reactions(text);
        let atomic_numbers = resolve_all(&nuclides);

        AnnotationResult {
            nuclides,
            reactions,
            atomic_numbers,
        }
    }
}

impl Default for KeywordAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::annotation::rules::RegexRule;

    #[test]
    fn test_absent_text() {
        let result = KeywordAnnotator::new().annotate(None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let result = KeywordAnnotator::new().annotate(Some(""));
        assert_eq!(result, AnnotationResult::default());
    }

    #[test]
    fn test_full_keyword_line() {
        let text = "NUCLEAR REACTIONS {+27}Al(n,α), {+56}Fe(n,p), E=14 MeV; \
                    measured σ. {+24}Na deduced yields.";
        let result = KeywordAnnotator::new().annotate(Some(text));

        assert_eq!(result.nuclides, vec!["24Na", "27Al", "56Fe"]);
        assert_eq!(result.reactions, vec!["(n,p)", "(n,α)"]);
        assert_eq!(result.atomic_numbers, vec![11, 13, 26]);
    }

    #[test]
    fn test_try_new_validates_table() {
        assert!(KeywordAnnotator::try_new().is_ok());
    }

    #[test]
    fn test_bare_rule_can_be_disabled() {
        let config = AnnotationConfig {
            bare_mass_numbers: false,
        };
        let annotator = KeywordAnnotator::from_config(&config).expect("valid table");
        assert!(!annotator.rule_ids().contains(&BARE_RULE_ID));

        let result = annotator.annotate(Some("16O and {+208}Pb"));
        assert_eq!(result.nuclides, vec!["208Pb"]);
        assert_eq!(result.atomic_numbers, vec![82]);
    }

    #[test]
    fn test_with_rule_appends() {
        let rule = RegexRule::new("mass_dash", r"\b([0-9]+)-([A-Z][a-z]?)\b").expect("valid rule");
        let annotator = KeywordAnnotator::new().with_rule(Box::new(rule));

        assert_eq!(annotator.rule_ids().last(), Some(&"mass_dash"));
        let result = annotator.annotate(Some("238-U and 238U"));
        assert_eq!(result.nuclides, vec!["238U"]);
        assert_eq!(result.atomic_numbers, vec![92]);
    }
}
