//! Classifier service: the entry point used by the HTTP layer and the CLI.
//!
//! The service owns the currently installed [`TrainedModel`] behind an `Arc` that is swapped
//! as a whole. Inference clones the `Arc` and works on an immutable snapshot; retraining
//! builds a complete new model, persists it, and only then swaps it in. A failed training run
//! leaves the installed model untouched.

use crate::conditions::derive_condition_info;
use crate::constants::MODEL_TYPE;
use crate::dataset::{load_dataset, prepare_training_data, DatasetRecord};
use crate::pipeline::train;
use crate::ranker::{rank, summarise, Analysis, Prediction};
use crate::store::{ModelStore, TrainedModel};
use crate::{ClassifierError, ClassifierResult, CoreConfig};
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Status report about the installed model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelInfo {
    NotTrained,
    Trained {
        total_conditions: usize,
        conditions: Vec<String>,
        model_type: String,
    },
}

/// Train and predict against a single shared model.
#[derive(Debug)]
pub struct ClassifierService {
    cfg: Arc<CoreConfig>,
    store: ModelStore,
    current: RwLock<Option<Arc<TrainedModel>>>,
}

impl ClassifierService {
    /// Creates a service with no model installed. Nothing is read from disk until first use.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let store = ModelStore::new(&cfg);
        Self {
            cfg,
            store,
            current: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    fn installed(&self) -> Option<Arc<TrainedModel>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn install(&self, model: Arc<TrainedModel>) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(model);
    }

    pub fn is_trained(&self) -> bool {
        self.installed().is_some()
    }

    /// Train from a dataset file, persist the result and install it.
    ///
    /// # Returns
    ///
    /// Hold-out accuracy in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns a dataset load error for unreadable input, `ClassifierError::Training` for
    /// degenerate data, or a save error if persisting fails. The installed model is unchanged
    /// on any error.
    pub fn train(&self, dataset_path: &Path) -> ClassifierResult<f64> {
        tracing::info!("Loading and processing dataset...");
        let records = load_dataset(dataset_path)?;
        self.train_records(&records)
    }

    /// Train from in-memory records; see [`ClassifierService::train`].
    pub fn train_records(&self, records: &[DatasetRecord]) -> ClassifierResult<f64> {
        let prepared = prepare_training_data(records);
        let conditions = derive_condition_info(records);
        let outcome = train(&prepared, self.cfg.params())?;

        let model = TrainedModel {
            pipeline: outcome.pipeline,
            conditions,
        };
        self.store.save(&model)?;
        self.install(Arc::new(model));

        Ok(outcome.accuracy)
    }

    /// Load the persisted model pair and install it.
    ///
    /// Returns `Ok(false)` when nothing has been persisted yet.
    pub fn load(&self) -> ClassifierResult<bool> {
        match self.store.load()? {
            Some(model) => {
                self.install(Arc::new(model));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The installed model, loading it from the store on first use.
    fn model(&self) -> ClassifierResult<Arc<TrainedModel>> {
        if let Some(model) = self.installed() {
            return Ok(model);
        }

        if self.load()? {
            if let Some(model) = self.installed() {
                return Ok(model);
            }
        }
        Err(ClassifierError::ModelNotTrained)
    }

    /// Rank candidate conditions for free-text symptoms.
    ///
    /// Returns an empty list for content-free text.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::ModelNotTrained` when no model is installed or persisted,
    /// a model load error when persisted artifacts are unusable, and
    /// `ClassifierError::InvalidInput` when `top_k` is zero.
    pub fn predict(&self, symptom_text: &str, top_k: usize) -> ClassifierResult<Vec<Prediction>> {
        if top_k == 0 {
            return Err(ClassifierError::InvalidInput(
                "top_k must be at least 1".into(),
            ));
        }

        let model = self.model()?;
        let probabilities = model.pipeline.predict_probabilities(symptom_text);
        Ok(rank(&probabilities, &model.conditions, top_k))
    }

    /// Predict with the configured default `top_k` and aggregate urgency/recommendations.
    pub fn analyze(&self, symptom_text: &str) -> ClassifierResult<Analysis> {
        self.analyze_top_k(symptom_text, self.cfg.default_top_k())
    }

    pub fn analyze_top_k(&self, symptom_text: &str, top_k: usize) -> ClassifierResult<Analysis> {
        self.predict(symptom_text, top_k).map(summarise)
    }

    /// Describe the installed model without touching the store.
    pub fn model_info(&self) -> ModelInfo {
        match self.installed() {
            None => ModelInfo::NotTrained,
            Some(model) => ModelInfo::Trained {
                total_conditions: model.conditions.len(),
                conditions: model.conditions.keys().cloned().collect(),
                model_type: MODEL_TYPE.to_string(),
            },
        }
    }
}
