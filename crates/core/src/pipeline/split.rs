//! Seeded stratified train/test split.

use crate::{ClassifierError, ClassifierResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Train and test row indices, each in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split row indices so every label is represented in both partitions.
///
/// Each label contributes `round(count * test_size)` rows to the test partition, clamped so
/// that both partitions receive at least one row of every label.
///
/// # Errors
///
/// Returns `ClassifierError::Training` if any label has fewer than two rows.
pub fn stratified_split(labels: &[String], test_size: f64, seed: u64) -> ClassifierResult<Split> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        groups.entry(label.as_str()).or_default().push(idx);
    }

    if let Some((label, rows)) = groups.iter().find(|(_, rows)| rows.len() < 2) {
        return Err(ClassifierError::Training(format!(
            "cannot stratify: label '{}' has {} sample(s), at least 2 are required",
            label,
            rows.len()
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for rows in groups.values_mut() {
        rows.shuffle(&mut rng);
        let n_test = ((rows.len() as f64 * test_size).round() as usize).clamp(1, rows.len() - 1);
        test.extend_from_slice(&rows[..n_test]);
        train.extend_from_slice(&rows[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();

    Ok(Split { train, test })
}
