//! Atomic number resolution for normalized nuclide identifiers.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::elements::{self, AtomicNumber};

static NUCLIDE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)([A-Z][a-z]?)").expect("nuclide shape pattern should compile")
});

/// Resolve `"16O"` to 8. Returns `None` when the identifier has no leading
/// mass number or its symbol is not an element.
pub fn resolve(nuclide: &str) -> Option<AtomicNumber> {
    let cap = NUCLIDE_SHAPE.captures(nuclide)?;
    elements::lookup(cap.get(2)?.as_str())
}

/// Resolve every identifier, dropping failures, deduplicated and sorted
/// numerically.
pub fn resolve_all<S: AsRef<str>>(nuclides: &[S]) -> Vec<AtomicNumber> {
    let zs: BTreeSet<AtomicNumber> = nuclides
        .iter()
        .filter_map(|n| resolve(n.as_ref()))
        .collect();
    zs.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_every_element() {
        for element in elements::iter() {
            let nuclide = format!("12{}", element.symbol);
            assert_eq!(
                resolve(&nuclide),
                Some(element.atomic_number),
                "{}",
                nuclide
            );
        }
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(resolve("12Xx"), None);
        assert_eq!(resolve("O16"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_resolve_all_sorts_numerically() {
        let nuclides = ["208Pb", "16O", "17O", "100Fm"];
        assert_eq!(resolve_all(&nuclides), vec![8, 82, 100]);
    }

    #[test]
    fn test_resolve_all_drops_failures() {
        let nuclides = vec!["12Xx".to_string(), "24Na".to_string()];
        assert_eq!(resolve_all(&nuclides), vec![11]);
    }
}
