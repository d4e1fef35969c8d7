//! Constants used throughout the symptom core crate.
//!
//! Artifact filenames, default locations and the fixed classifier
//! hyper-parameters live here so the training and inference paths agree.

/// Default directory for persisted model artifacts when none is configured.
pub const DEFAULT_MODEL_DIR: &str = "models";

/// Filename for the serialised classification pipeline.
pub const PIPELINE_FILENAME: &str = "symptom_classifier.json";

/// Filename for the serialised condition metadata table.
pub const CONDITIONS_FILENAME: &str = "condition_info.json";

/// Current on-disk artifact format. Bump when the serialised shape changes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Default number of ranked predictions returned per request.
pub const DEFAULT_TOP_K: usize = 3;

/// Predictions at or below this probability are dropped after top-k truncation.
pub const PROBABILITY_THRESHOLD: f64 = 0.01;

/// Maximum number of merged recommendations returned by an analysis.
pub const MAX_SUMMARY_RECOMMENDATIONS: usize = 3;

/// Human readable model family reported by model info.
pub const MODEL_TYPE: &str = "TF-IDF + Naive Bayes";

/// Vocabulary cap for the feature extractor.
pub const MAX_FEATURES: usize = 5000;

/// Minimum document frequency (absolute count) for a term to be kept.
pub const MIN_DF: usize = 2;

/// Maximum document frequency (fraction of documents) for a term to be kept.
pub const MAX_DF: f64 = 0.95;

/// Additive smoothing for the multinomial classifier.
pub const ALPHA: f64 = 0.1;

/// Fraction of each label held out for accuracy reporting.
pub const TEST_SIZE: f64 = 0.2;

/// Seed for the stratified split.
pub const SPLIT_SEED: u64 = 42;
