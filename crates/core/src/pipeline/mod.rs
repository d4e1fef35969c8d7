//! Classification pipeline: TF-IDF feature extraction composed with multinomial naive Bayes.
//!
//! [`train`] reports hold-out accuracy from a stratified split and returns a pipeline fitted
//! on the full prepared corpus. The split only affects the reported accuracy.

pub mod naive_bayes;
pub mod split;
pub mod tfidf;

use crate::constants::{ALPHA, MAX_DF, MAX_FEATURES, MIN_DF, SPLIT_SEED, TEST_SIZE};
use crate::dataset::PreparedData;
use crate::normalise::clean;
use crate::{ClassifierError, ClassifierResult};
use naive_bayes::MultinomialNb;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tfidf::{SparseRow, TfidfConfig, TfidfVectorizer};

/// Hyper-parameters for the feature extractor, classifier and evaluation split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    pub max_features: usize,
    pub ngram_range: (usize, usize),
    pub min_df: usize,
    pub max_df: f64,
    pub alpha: f64,
    pub test_size: f64,
    pub seed: u64,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            max_features: MAX_FEATURES,
            ngram_range: (1, 2),
            min_df: MIN_DF,
            max_df: MAX_DF,
            alpha: ALPHA,
            test_size: TEST_SIZE,
            seed: SPLIT_SEED,
        }
    }
}

impl PipelineParams {
    pub fn validate(&self) -> ClassifierResult<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::InvalidInput(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        if self.max_features == 0 {
            return Err(ClassifierError::InvalidInput(
                "max_features must be at least 1".into(),
            ));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(ClassifierError::InvalidInput(
                "max_df must be in (0, 1]".into(),
            ));
        }
        if !(self.alpha > 0.0) {
            return Err(ClassifierError::InvalidInput(
                "alpha must be positive".into(),
            ));
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ClassifierError::InvalidInput(
                "test_size must be in (0, 1)".into(),
            ));
        }
        Ok(())
    }

    fn tfidf(&self) -> TfidfConfig {
        TfidfConfig {
            max_features: self.max_features,
            ngram_range: self.ngram_range,
            min_df: self.min_df,
            max_df: self.max_df,
        }
    }
}

/// A fitted vectorizer and classifier over a fixed, sorted set of labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    classes: Vec<String>,
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

/// Result of a successful training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub pipeline: Pipeline,
    /// Hold-out accuracy in `[0, 1]`.
    pub accuracy: f64,
    pub train_samples: usize,
    pub test_samples: usize,
}

/// Validate, evaluate on a stratified hold-out partition, then fit on the full corpus.
///
/// # Errors
///
/// Returns `ClassifierError::Training` if:
/// - the prepared corpus is empty,
/// - fewer than two distinct labels are present,
/// - a label has too few samples to stratify,
/// - no features survive document-frequency pruning on the full corpus.
pub fn train(data: &PreparedData, params: &PipelineParams) -> ClassifierResult<TrainingOutcome> {
    params.validate()?;

    if data.is_empty() {
        return Err(ClassifierError::Training(
            "no samples left after cleaning".into(),
        ));
    }
    if data.texts.len() != data.labels.len() {
        return Err(ClassifierError::InvalidInput(
            "texts and labels must be the same length".into(),
        ));
    }

    let distinct: BTreeSet<&str> = data.labels.iter().map(String::as_str).collect();
    if distinct.len() < 2 {
        return Err(ClassifierError::Training(format!(
            "at least 2 distinct labels are required, found {}",
            distinct.len()
        )));
    }

    tracing::info!("Training on {} samples...", data.len());
    tracing::info!("Unique conditions: {}", distinct.len());

    let split = split::stratified_split(&data.labels, params.test_size, params.seed)?;
    let pick = |indices: &[usize], source: &[String]| -> Vec<String> {
        indices.iter().map(|&i| source[i].clone()).collect()
    };
    let train_texts = pick(&split.train, &data.texts);
    let train_labels = pick(&split.train, &data.labels);
    let test_texts = pick(&split.test, &data.texts);
    let test_labels = pick(&split.test, &data.labels);

    let evaluation = Pipeline::fit_unchecked(&train_texts, &train_labels, params);
    if evaluation.vectorizer.n_features() == 0 {
        tracing::warn!("evaluation partition produced an empty vocabulary; accuracy reflects priors only");
    }
    let accuracy = evaluation.accuracy(&test_texts, &test_labels);

    tracing::info!("Training classifier...");
    let pipeline = Pipeline::fit(&data.texts, &data.labels, params)?;

    tracing::info!("Training completed!");
    tracing::info!("Accuracy: {:.3}", accuracy);
    tracing::info!("Test samples: {}", split.test.len());

    Ok(TrainingOutcome {
        pipeline,
        accuracy,
        train_samples: split.train.len(),
        test_samples: split.test.len(),
    })
}

impl Pipeline {
    /// Fit a pipeline on already-cleaned texts.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::Training` if the vocabulary is empty after pruning.
    pub fn fit(texts: &[String], labels: &[String], params: &PipelineParams) -> ClassifierResult<Self> {
        let pipeline = Self::fit_unchecked(texts, labels, params);
        if pipeline.vectorizer.n_features() == 0 {
            return Err(ClassifierError::Training(
                "no terms survived document-frequency pruning; the dataset is too small or uniform"
                    .into(),
            ));
        }
        tracing::debug!("pipeline fitted with {} features", pipeline.vectorizer.n_features());
        Ok(pipeline)
    }

    fn fit_unchecked(texts: &[String], labels: &[String], params: &PipelineParams) -> Self {
        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let class_index: BTreeMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        let targets: Vec<usize> = labels.iter().map(|l| class_index[l.as_str()]).collect();

        let vectorizer = TfidfVectorizer::fit(texts, &params.tfidf());
        let rows: Vec<SparseRow> = texts.iter().map(|t| vectorizer.transform(t)).collect();
        let classifier = MultinomialNb::fit(
            &rows,
            &targets,
            classes.len(),
            vectorizer.n_features(),
            params.alpha,
        );

        Self {
            classes,
            vectorizer,
            classifier,
        }
    }

    /// Fraction of `texts` whose most probable label matches `labels`.
    pub fn accuracy(&self, texts: &[String], labels: &[String]) -> f64 {
        if texts.is_empty() {
            return 0.0;
        }
        let correct = texts
            .iter()
            .zip(labels)
            .filter(|(text, label)| {
                let predicted = self.classifier.predict(&self.vectorizer.transform(text));
                self.classes[predicted] == **label
            })
            .count();
        correct as f64 / texts.len() as f64
    }

    /// Probability per known label for raw symptom text.
    ///
    /// The text is normalised first. Content-free input yields an empty map rather than an
    /// error; otherwise the map covers every trained label and sums to one.
    pub fn predict_probabilities(&self, text: &str) -> BTreeMap<String, f64> {
        let cleaned = clean(text);
        if cleaned.is_empty() {
            return BTreeMap::new();
        }

        let row = self.vectorizer.transform(&cleaned);
        self.classes
            .iter()
            .cloned()
            .zip(self.classifier.predict_proba(&row))
            .collect()
    }

    /// Trained labels in sorted order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }
}
