//! Nuclide surface-form rules.
//!
//! NSR keyword text writes nuclides several ways (`{+16}O`, `$^{16}$O`,
//! `^{16}O`, `16O`). Each form is a `NuclideRule` that reports raw
//! `(mass, symbol)` candidates; validation against the element table and
//! normalization happen once, in the extractor, for every rule alike.

use std::sync::LazyLock;

use regex::Regex;

use super::types::AnnotationError;

/// A raw `(mass, symbol)` pair found by a rule, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'t> {
    pub mass: &'t str,
    pub symbol: &'t str,
}

impl Candidate<'_> {
    /// Render as `<mass><symbol>` with leading zeros stripped from the mass.
    ///
    /// Returns `None` for a zero mass number.
    pub fn normalize(&self) -> Option<String> {
        let mass = self.mass.trim_start_matches('0');
        if mass.is_empty() {
            return None;
        }
        Some(format!("{}{}", mass, self.symbol))
    }
}

/// A single surface form that can find nuclide candidates in text.
///
/// Every rule scans the whole input independently; rules never consume
/// spans from one another.
pub trait NuclideRule: Send + Sync {
    /// Short identifier used in logs (e.g. "braced_plus").
    fn rule_id(&self) -> &str;

    /// All candidates this rule matches, left to right.
    fn candidates<'t>(&self, text: &'t str) -> Vec<Candidate<'t>>;
}

// ============================================================================
// Built-in surface forms
// ============================================================================

// Mass digits are ASCII only; `\d` would also accept other Unicode digits.
static BRACED_PLUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\+([0-9]+)\}([A-Z][a-z]?)").expect("braced-plus pattern should compile")
});

static DOLLAR_CARET_BRACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\^\{([0-9]+)\}\$([A-Z][a-z]?)")
        .expect("dollar-caret-brace pattern should compile")
});

static CARET_BRACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\^\{([0-9]+)\}([A-Z][a-z]?)").expect("caret-brace pattern should compile")
});

static BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]{1,3})([A-Z][a-z]?)\b").expect("bare pattern should compile")
});

/// Rule identifier of the bare `16O` form.
pub const BARE_RULE_ID: &str = "bare";

/// A rule backed by a regex whose first capture group is the mass number
/// and whose second is the element symbol.
#[derive(Debug, Clone)]
pub struct RegexRule {
    id: String,
    pattern: Regex,
}

impl RegexRule {
    /// Build a rule from a pattern string.
    pub fn new(id: impl Into<String>, pattern: &str) -> Result<Self, AnnotationError> {
        let id = id.into();
        let pattern = Regex::new(pattern).map_err(|e| AnnotationError::InvalidRule {
            id: id.clone(),
            reason: e.to_string(),
        })?;
        Self::from_regex(id, pattern)
    }

    /// Wrap an already-compiled regex.
    pub fn from_regex(id: impl Into<String>, pattern: Regex) -> Result<Self, AnnotationError> {
        let id = id.into();
        // Group 0 is the whole match; mass and symbol need two more.
        if pattern.captures_len() < 3 {
            return Err(AnnotationError::InvalidRule {
                id,
                reason: "pattern needs a mass group and a symbol group".to_string(),
            });
        }
        Ok(Self { id, pattern })
    }
}

impl NuclideRule for RegexRule {
    fn rule_id(&self) -> &str {
        &self.id
    }

    fn candidates<'t>(&self, text: &'t str) -> Vec<Candidate<'t>> {
        self.pattern
            .captures_iter(text)
            .filter_map(|cap| {
                let mass = cap.get(1)?.as_str();
                let symbol = cap.get(2)?.as_str();
                Some(Candidate { mass, symbol })
            })
            .collect()
    }
}

fn builtin(id: &str, pattern: &Regex) -> Box<dyn NuclideRule> {
    Box::new(RegexRule {
        id: id.to_string(),
        pattern: pattern.clone(),
    })
}

/// The four NSR surface forms in their fixed application order.
pub fn default_rules() -> Vec<Box<dyn NuclideRule>> {
    vec![
        builtin("braced_plus", &BRACED_PLUS),
        builtin("dollar_caret_brace", &DOLLAR_CARET_BRACE),
        builtin("caret_brace", &CARET_BRACE),
        builtin(BARE_RULE_ID, &BARE),
    ]
}
