//! Ranking of class probabilities into enriched predictions.

use crate::conditions::{ConditionMetadata, ConditionTable, Urgency};
use crate::constants::{MAX_SUMMARY_RECOMMENDATIONS, PROBABILITY_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A ranked candidate condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub condition: String,
    pub probability: f64,
    pub description: String,
    pub urgency: Urgency,
    pub recommendations: Vec<String>,
}

/// Predictions plus the aggregate urgency and merged recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub predictions: Vec<Prediction>,
    /// Highest urgency across `predictions`; `None` when there are no predictions.
    pub urgency: Option<Urgency>,
    /// First-seen, de-duplicated recommendations across `predictions`, at most three.
    pub recommendations: Vec<String>,
}

/// Rank labels by probability and attach metadata.
///
/// Labels are ordered by probability descending, ties broken by label ascending. The first
/// `top_k` are kept and only then are entries at or below the probability threshold removed,
/// so fewer than `top_k` (possibly zero) predictions may be returned even when lower-ranked
/// labels clear the threshold. Labels missing from `conditions` get fallback metadata.
pub fn rank(
    probabilities: &BTreeMap<String, f64>,
    conditions: &ConditionTable,
    top_k: usize,
) -> Vec<Prediction> {
    let mut ordered: Vec<(&String, f64)> = probabilities.iter().map(|(l, p)| (l, *p)).collect();
    ordered.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ordered
        .into_iter()
        .take(top_k)
        .filter(|(_, probability)| *probability > PROBABILITY_THRESHOLD)
        .map(|(label, probability)| {
            let meta = match conditions.get(label) {
                Some(meta) => meta.clone(),
                None => {
                    tracing::warn!("no condition metadata for '{}', using defaults", label);
                    ConditionMetadata::fallback(label)
                }
            };
            Prediction {
                condition: label.clone(),
                probability,
                description: meta.description,
                urgency: meta.urgency,
                recommendations: meta.recommendations,
            }
        })
        .collect()
}

/// Aggregate urgency and recommendations across ranked predictions.
pub fn summarise(predictions: Vec<Prediction>) -> Analysis {
    let urgency = predictions.iter().map(|p| p.urgency).max();

    let recommendations = {
        let mut seen = HashSet::new();
        predictions
            .iter()
            .flat_map(|p| p.recommendations.iter())
            .filter(|r| seen.insert(r.as_str()))
            .take(MAX_SUMMARY_RECOMMENDATIONS)
            .cloned()
            .collect()
    };

    Analysis {
        predictions,
        urgency,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probs(items: &[(&str, f64)]) -> BTreeMap<String, f64> {
        items.iter().map(|(l, p)| (l.to_string(), *p)).collect()
    }

    fn table(labels: &[&str]) -> ConditionTable {
        labels
            .iter()
            .map(|l| (l.to_string(), ConditionMetadata::derive(l, 1)))
            .collect()
    }

    fn names(predictions: &[Prediction]) -> Vec<&str> {
        predictions.iter().map(|p| p.condition.as_str()).collect()
    }

    #[test]
    fn test_rank_orders_by_probability() {
        let p = probs(&[("A", 0.2), ("B", 0.5), ("C", 0.3)]);
        let ranked = rank(&p, &table(&["A", "B", "C"]), 3);
        assert_eq!(names(&ranked), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_rank_truncates_before_threshold() {
        let p = probs(&[("A", 0.5), ("B", 0.3), ("C", 0.005), ("D", 0.2)]);

        let ranked = rank(&p, &table(&["A", "B", "C", "D"]), 2);

        assert_eq!(names(&ranked), vec!["A", "B"]);
    }

    #[test]
    fn test_rank_threshold_applies_after_truncation() {
        let p = probs(&[("A", 0.97), ("B", 0.01), ("C", 0.009), ("D", 0.011)]);

        let ranked = rank(&p, &table(&["A", "B", "C", "D"]), 2);

        // D (0.011) is ranked 2nd and survives; 0.01 exactly is dropped.
        assert_eq!(names(&ranked), vec!["A", "D"]);

        let ranked = rank(&probs(&[("A", 0.6), ("B", 0.4)]), &table(&["A"]), 0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_can_return_nothing() {
        let p: BTreeMap<String, f64> = (0..10).map(|i| (format!("L{i}"), 0.01)).collect();

        let ranked = rank(&p, &ConditionTable::new(), 3);

        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_ties_broken_by_label() {
        let p = probs(&[("Gamma", 0.25), ("Alpha", 0.25), ("Beta", 0.25), ("Delta", 0.25)]);

        let ranked = rank(&p, &table(&["Alpha", "Beta", "Gamma", "Delta"]), 3);

        assert_eq!(names(&ranked), vec!["Alpha", "Beta", "Delta"]);
    }

    #[test]
    fn test_rank_never_exceeds_top_k_or_threshold() {
        let p = probs(&[("A", 0.4), ("B", 0.3), ("C", 0.2), ("D", 0.09), ("E", 0.01)]);
        for k in 0..7 {
            let ranked = rank(&p, &ConditionTable::new(), k);
            assert!(ranked.len() <= k);
            assert!(ranked.iter().all(|p| p.probability > 0.01));
        }
    }

    #[test]
    fn test_rank_attaches_metadata_or_fallback() {
        let p = probs(&[("Heart attack", 0.7), ("Unknown rash", 0.3)]);

        let ranked = rank(&p, &table(&["Heart attack"]), 2);

        assert_eq!(ranked[0].urgency, Urgency::Emergency);
        assert_eq!(ranked[0].recommendations.len(), 4);
        assert_eq!(ranked[1].description, "Medical condition: Unknown rash");
        assert_eq!(ranked[1].urgency, Urgency::Routine);
        assert_eq!(ranked[1].recommendations.len(), 2);
    }

    #[test]
    fn test_summarise_takes_max_urgency_and_dedupes() {
        let p = probs(&[("Migraine", 0.5), ("Diabetes", 0.3), ("Psoriasis", 0.2)]);
        let ranked = rank(&p, &table(&["Migraine", "Diabetes", "Psoriasis"]), 3);

        let analysis = summarise(ranked);

        assert_eq!(analysis.urgency, Some(Urgency::Urgent));
        assert_eq!(
            analysis.recommendations,
            vec![
                "Consult with a healthcare provider",
                "Monitor symptoms closely",
                "Follow prescribed treatment plan",
            ]
        );
    }

    #[test]
    fn test_summarise_dedupes_across_predictions() {
        let p = probs(&[("Tension headache", 0.6), ("Migraine", 0.4)]);
        let ranked = rank(&p, &table(&["Migraine"]), 2);

        let analysis = summarise(ranked);

        // Fallback list comes first; the generic list repeats its two entries.
        assert_eq!(analysis.recommendations.len(), 3);
        assert_eq!(analysis.recommendations[2], "Follow prescribed treatment plan");
    }

    #[test]
    fn test_summarise_empty() {
        let analysis = summarise(Vec::new());
        assert_eq!(analysis.urgency, None);
        assert!(analysis.recommendations.is_empty());
    }
}
