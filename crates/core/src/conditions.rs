//! Condition metadata derived from dataset labels.
//!
//! Urgency and recommendations are assigned by ordered, case-insensitive substring rules over
//! the label string. The keyword lists and their order are authoritative: the emergency list
//! is checked before the urgent list, so a label matching both (e.g. "pneumonia") resolves to
//! [`Urgency::Emergency`]. Changing either list or the order changes classification outcomes.

use crate::dataset::DatasetRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Emergency keywords, checked first.
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "heart attack",
    "stroke",
    "anaphylaxis",
    "sepsis",
    "pneumonia",
    "meningitis",
    "appendicitis",
];

/// Urgent keywords, checked only when no emergency keyword matches.
pub const URGENT_KEYWORDS: &[&str] = &[
    "diabetes",
    "hypertension",
    "pneumonia",
    "bronchitis",
    "kidney",
    "liver",
    "infection",
];

const PSORIASIS_RECOMMENDATIONS: [&str; 4] = [
    "Consult a dermatologist for proper diagnosis",
    "Avoid triggers like stress and certain medications",
    "Use moisturizers to keep skin hydrated",
    "Consider topical treatments as prescribed",
];

const DIABETES_RECOMMENDATIONS: [&str; 4] = [
    "Monitor blood sugar levels regularly",
    "Follow prescribed medication schedule",
    "Maintain a balanced diet",
    "Schedule regular check-ups with your doctor",
];

const HYPERTENSION_RECOMMENDATIONS: [&str; 4] = [
    "Monitor blood pressure regularly",
    "Reduce sodium intake",
    "Exercise regularly as approved by doctor",
    "Take prescribed medications consistently",
];

const GENERIC_RECOMMENDATIONS: [&str; 4] = [
    "Consult with a healthcare provider",
    "Monitor symptoms closely",
    "Follow prescribed treatment plan",
    "Seek immediate care if symptoms worsen",
];

/// Recommendations for a label that has no metadata entry at ranking time.
pub const MISSING_METADATA_RECOMMENDATIONS: [&str; 2] =
    ["Consult with a healthcare provider", "Monitor symptoms closely"];

/// Recommendation rules in match order.
const RECOMMENDATION_RULES: [(&str, [&str; 4]); 3] = [
    ("psoriasis", PSORIASIS_RECOMMENDATIONS),
    ("diabetes", DIABETES_RECOMMENDATIONS),
    ("hypertension", HYPERTENSION_RECOMMENDATIONS),
];

/// Severity tier, ordered `Routine < Urgent < Emergency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Routine,
    Urgent,
    Emergency,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Routine => "routine",
            Self::Urgent => "urgent",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to every prediction for a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionMetadata {
    pub name: String,
    pub sample_count: usize,
    pub description: String,
    pub urgency: Urgency,
    pub recommendations: Vec<String>,
}

impl ConditionMetadata {
    /// Build the rule-derived metadata for a label.
    pub fn derive(label: &str, sample_count: usize) -> Self {
        Self {
            name: label.to_string(),
            sample_count,
            description: describe(label),
            urgency: determine_urgency(label),
            recommendations: recommendations_for(label),
        }
    }

    /// Defaults used when a predicted label has no entry in the table.
    pub fn fallback(label: &str) -> Self {
        Self {
            name: label.to_string(),
            sample_count: 0,
            description: describe(label),
            urgency: Urgency::Routine,
            recommendations: MISSING_METADATA_RECOMMENDATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Metadata table keyed by condition label.
pub type ConditionTable = BTreeMap<String, ConditionMetadata>;

fn describe(label: &str) -> String {
    format!("Medical condition: {label}")
}

/// Classify a label's urgency tier from its name.
pub fn determine_urgency(label: &str) -> Urgency {
    let lower = label.to_lowercase();

    if EMERGENCY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Urgency::Emergency
    } else if URGENT_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Urgency::Urgent
    } else {
        Urgency::Routine
    }
}

/// Pick the four-item recommendation list for a label.
pub fn recommendations_for(label: &str) -> Vec<String> {
    let lower = label.to_lowercase();

    let list = RECOMMENDATION_RULES
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map(|(_, list)| list)
        .unwrap_or(&GENERIC_RECOMMENDATIONS);

    list.iter().map(|s| s.to_string()).collect()
}

/// Derive one metadata entry per distinct label, counting every record carrying it.
pub fn derive_condition_info(records: &[DatasetRecord]) -> ConditionTable {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.label.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), ConditionMetadata::derive(label, count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, label: &str) -> DatasetRecord {
        DatasetRecord {
            text: Some(text.into()),
            label: label.into(),
        }
    }

    #[test]
    fn test_heart_attack_is_emergency() {
        assert_eq!(determine_urgency("Heart Attack"), Urgency::Emergency);
        assert_eq!(determine_urgency("silent heart attack"), Urgency::Emergency);
    }

    #[test]
    fn test_diabetes_is_urgent() {
        assert_eq!(determine_urgency("Diabetes"), Urgency::Urgent);
        assert_eq!(determine_urgency("Urinary tract infection"), Urgency::Urgent);
    }

    #[test]
    fn test_emergency_checked_before_urgent() {
        // "pneumonia" appears in both lists.
        assert_eq!(determine_urgency("Pneumonia"), Urgency::Emergency);
        assert_eq!(
            determine_urgency("Stroke with kidney failure"),
            Urgency::Emergency
        );
    }

    #[test]
    fn test_unmatched_label_is_routine() {
        assert_eq!(determine_urgency("Migraine"), Urgency::Routine);
        assert_eq!(determine_urgency("Common Cold"), Urgency::Routine);
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(Urgency::Routine < Urgency::Urgent);
        assert!(Urgency::Urgent < Urgency::Emergency);
    }

    #[test]
    fn test_urgency_serialises_lowercase() {
        let json = serde_json::to_string(&Urgency::Emergency).unwrap();
        assert_eq!(json, "\"emergency\"");
    }

    #[test]
    fn test_recommendations_by_fragment() {
        assert_eq!(
            recommendations_for("Psoriasis")[0],
            "Consult a dermatologist for proper diagnosis"
        );
        assert_eq!(
            recommendations_for("Type 2 Diabetes")[0],
            "Monitor blood sugar levels regularly"
        );
        assert_eq!(
            recommendations_for("Hypertension")[1],
            "Reduce sodium intake"
        );
        let generic = recommendations_for("Migraine");
        assert_eq!(generic.len(), 4);
        assert_eq!(generic[3], "Seek immediate care if symptoms worsen");
    }

    #[test]
    fn test_derive_condition_info_counts_samples() {
        let records = vec![
            record("fever cough", "Flu"),
            record("", "Flu"),
            record("headache", "Migraine"),
        ];

        let table = derive_condition_info(&records);

        assert_eq!(table.len(), 2);
        let flu = &table["Flu"];
        assert_eq!(flu.sample_count, 2);
        assert_eq!(flu.description, "Medical condition: Flu");
        assert_eq!(flu.urgency, Urgency::Routine);
        assert_eq!(flu.recommendations.len(), 4);
        assert_eq!(table["Migraine"].sample_count, 1);
    }

    #[test]
    fn test_fallback_metadata() {
        let meta = ConditionMetadata::fallback("Mystery");
        assert_eq!(meta.description, "Medical condition: Mystery");
        assert_eq!(meta.urgency, Urgency::Routine);
        assert_eq!(
            meta.recommendations,
            vec!["Consult with a healthcare provider", "Monitor symptoms closely"]
        );
    }
}
