//! Multinomial naive Bayes over sparse TF-IDF rows.

use super::tfidf::SparseRow;
use serde::{Deserialize, Serialize};

/// Fitted multinomial naive Bayes parameters.
///
/// `feature_log_prob[c][j]` is `ln((N_cj + alpha) / (N_c + alpha * n_features))` where `N_cj`
/// is the summed weight of feature `j` over the training rows of class `c`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit on `rows` with class indices `targets` in `0..n_classes`.
    ///
    /// Every class index must occur at least once in `targets`.
    pub fn fit(
        rows: &[SparseRow],
        targets: &[usize],
        n_classes: usize,
        n_features: usize,
        alpha: f64,
    ) -> Self {
        let mut class_count = vec![0usize; n_classes];
        let mut feature_count = vec![vec![0.0f64; n_features]; n_classes];

        for (row, &class) in rows.iter().zip(targets) {
            class_count[class] += 1;
            for &(idx, weight) in row {
                feature_count[class][idx] += weight;
            }
        }

        let total = targets.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|&count| (count as f64 / total).ln())
            .collect();

        let feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let denominator = counts.iter().sum::<f64>() + alpha * n_features as f64;
                counts
                    .iter()
                    .map(|&c| ((c + alpha) / denominator).ln())
                    .collect()
            })
            .collect();

        Self {
            alpha,
            class_log_prior,
            feature_log_prob,
        }
    }

    /// Unnormalised joint log likelihood per class.
    fn joint_log_likelihood(&self, row: &SparseRow) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + row
                        .iter()
                        .map(|&(idx, weight)| weight * log_probs[idx])
                        .sum::<f64>()
            })
            .collect()
    }

    /// Posterior probability per class, summing to one.
    pub fn predict_proba(&self, row: &SparseRow) -> Vec<f64> {
        let jll = self.joint_log_likelihood(row);
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
        let sum: f64 = exp.iter().sum();
        exp.into_iter().map(|v| v / sum).collect()
    }

    /// Index of the most probable class; ties go to the lowest index.
    pub fn predict(&self, row: &SparseRow) -> usize {
        let jll = self.joint_log_likelihood(row);
        let mut best = 0;
        for (idx, value) in jll.iter().enumerate() {
            if *value > jll[best] {
                best = idx;
            }
        }
        best
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn n_classes(&self) -> usize {
        self.class_log_prior.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priors_follow_class_frequency() {
        let rows: Vec<SparseRow> = vec![vec![], vec![], vec![]];
        let model = MultinomialNb::fit(&rows, &[0, 0, 1], 2, 0, 0.1);

        let proba = model.predict_proba(&vec![]);

        assert!((proba[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((proba[1] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(model.predict(&vec![]), 0);
    }

    #[test]
    fn test_feature_evidence_moves_posterior() {
        let rows: Vec<SparseRow> = vec![
            vec![(0, 1.0)],
            vec![(0, 0.8), (1, 0.6)],
            vec![(2, 1.0)],
            vec![(1, 0.6), (2, 0.8)],
        ];
        let model = MultinomialNb::fit(&rows, &[0, 0, 1, 1], 2, 3, 0.1);

        let proba = model.predict_proba(&vec![(0, 1.0)]);

        assert!(proba[0] > 0.9);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(model.predict(&vec![(2, 1.0)]), 1);
    }

    #[test]
    fn test_smoothing_keeps_unseen_features_finite() {
        let rows: Vec<SparseRow> = vec![vec![(0, 1.0)], vec![(1, 1.0)]];
        let model = MultinomialNb::fit(&rows, &[0, 1], 2, 2, 0.1);

        for log_probs in &model.feature_log_prob {
            assert!(log_probs.iter().all(|v| v.is_finite()));
        }
        assert_eq!(model.alpha(), 0.1);
        assert_eq!(model.n_classes(), 2);
    }
}
