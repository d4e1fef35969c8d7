//! # Symptom Core
//!
//! Core logic for the symptom checker.
//!
//! This crate contains the text-classification pipeline and its persistence lifecycle:
//! - Text normalisation shared by training and inference
//! - Dataset loading, preparation and rule-based condition metadata
//! - TF-IDF feature extraction with multinomial naive Bayes
//! - Paired, versioned model artifacts on disk
//! - Top-k ranking of predictions with metadata enrichment
//!
//! **No API concerns**: HTTP routing, request schemas, CORS and per-user history belong in
//! `api-rest`; the console training tool lives in `symptom-cli`.

pub mod conditions;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod normalise;
pub mod pipeline;
pub mod ranker;
pub mod service;
pub mod store;

pub use conditions::{ConditionMetadata, ConditionTable, Urgency};
pub use config::CoreConfig;
pub use constants::{DEFAULT_MODEL_DIR, DEFAULT_TOP_K};
pub use dataset::DatasetRecord;
pub use error::{ClassifierError, ClassifierResult};
pub use normalise::clean;
pub use pipeline::PipelineParams;
pub use ranker::{Analysis, Prediction};
pub use service::{ClassifierService, ModelInfo};
pub use store::{ModelStore, TrainedModel};
