//! Distinct identifier counts across a batch of annotated records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::elements::AtomicNumber;

use super::types::AnnotationResult;

/// How many records mention each nuclide, reaction, and atomic number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub records: usize,
    pub nuclides: BTreeMap<String, usize>,
    pub reactions: BTreeMap<String, usize>,
    pub atomic_numbers: BTreeMap<AtomicNumber, usize>,
}

impl CorpusSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record's identifiers. Each identifier counts once per record.
    pub fn record(&mut self, result: &AnnotationResult) {
        self.records += 1;
        for nuclide in &result.nuclides {
            *self.nuclides.entry(nuclide.clone()).or_insert(0) += 1;
        }
        for reaction in &result.reactions {
            *self.reactions.entry(reaction.clone()).or_insert(0) += 1;
        }
        for z in &result.atomic_numbers {
            *self.atomic_numbers.entry(*z).or_insert(0) += 1;
        }
    }

    /// Fold another summary into this one.
    pub fn merge(&mut self, other: CorpusSummary) {
        self.records += other.records;
        for (k, v) in other.nuclides {
            *self.nuclides.entry(k).or_insert(0) += v;
        }
        for (k, v) in other.reactions {
            *self.reactions.entry(k).or_insert(0) += v;
        }
        for (k, v) in other.atomic_numbers {
            *self.atomic_numbers.entry(k).or_insert(0) += v;
        }
    }

    /// The `n` most frequent nuclides, ties broken by identifier order.
    pub fn top_nuclides(&self, n: usize) -> Vec<(&str, usize)> {
        top(&self.nuclides, n)
    }

    /// The `n` most frequent reactions, ties broken by identifier order.
    pub fn top_reactions(&self, n: usize) -> Vec<(&str, usize)> {
        top(&self.reactions, n)
    }
}

fn top(counts: &BTreeMap<String, usize>, n: usize) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    // BTreeMap iteration is already in key order; a stable sort keeps it for ties.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(nuclides: &[&str], reactions: &[&str], zs: &[AtomicNumber]) -> AnnotationResult {
        AnnotationResult {
            nuclides: nuclides.iter().map(|s| s.to_string()).collect(),
            reactions: reactions.iter().map(|s| s.to_string()).collect(),
            atomic_numbers: zs.to_vec(),
        }
    }

    #[test]
    fn test_counts_per_record() {
        let mut summary = CorpusSummary::new();
        summary.record(&result(&["16O", "208Pb"], &["(n,gamma)"], &[8, 82]));
        summary.record(&result(&["16O"], &[], &[8]));

        assert_eq!(summary.records, 2);
        assert_eq!(summary.nuclides.get("16O"), Some(&2));
        assert_eq!(summary.nuclides.get("208Pb"), Some(&1));
        assert_eq!(summary.reactions.get("(n,gamma)"), Some(&1));
        assert_eq!(summary.atomic_numbers.get(&8), Some(&2));
    }

    #[test]
    fn test_empty_result_still_counts_record() {
        let mut summary = CorpusSummary::new();
        summary.record(&AnnotationResult::default());
        assert_eq!(summary.records, 1);
        assert!(summary.nuclides.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut a = CorpusSummary::new();
        a.record(&result(&["16O"], &["(p,p')"], &[8]));
        let mut b = CorpusSummary::new();
        b.record(&result(&["16O", "12C"], &[], &[6, 8]));

        a.merge(b);
        assert_eq!(a.records, 2);
        assert_eq!(a.nuclides.get("16O"), Some(&2));
        assert_eq!(a.nuclides.get("12C"), Some(&1));
        assert_eq!(a.atomic_numbers.get(&8), Some(&2));
    }

    #[test]
    fn test_top_breaks_ties_by_identifier() {
        let mut summary = CorpusSummary::new();
        summary.record(&result(&["16O", "12C", "4He"], &[], &[]));
        summary.record(&result(&["4He"], &[], &[]));

        assert_eq!(
            summary.top_nuclides(3),
            vec![("4He", 2), ("12C", 1), ("16O", 1)]
        );
        assert_eq!(summary.top_nuclides(1), vec![("4He", 2)]);
        assert!(summary.top_reactions(5).is_empty());
    }
}
