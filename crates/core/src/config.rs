//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Request handling never reads process-wide environment variables; binaries read them
//! and hand the parsed values to [`CoreConfig::new`].

use crate::constants::{CONDITIONS_FILENAME, DEFAULT_TOP_K, PIPELINE_FILENAME};
use crate::pipeline::PipelineParams;
use crate::{ClassifierError, ClassifierResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    model_dir: PathBuf,
    default_top_k: usize,
    params: PipelineParams,
}

impl CoreConfig {
    /// Create a new `CoreConfig` with the default pipeline parameters.
    pub fn new(model_dir: PathBuf, default_top_k: usize) -> ClassifierResult<Self> {
        Self::with_params(model_dir, default_top_k, PipelineParams::default())
    }

    /// Create a new `CoreConfig` with explicit pipeline parameters.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::InvalidInput` if `default_top_k` is zero or the parameters
    /// are out of range.
    pub fn with_params(
        model_dir: PathBuf,
        default_top_k: usize,
        params: PipelineParams,
    ) -> ClassifierResult<Self> {
        if default_top_k == 0 {
            return Err(ClassifierError::InvalidInput(
                "default top_k must be at least 1".into(),
            ));
        }
        params.validate()?;

        Ok(Self {
            model_dir,
            default_top_k,
            params,
        })
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn pipeline_path(&self) -> PathBuf {
        self.model_dir.join(PIPELINE_FILENAME)
    }

    pub fn conditions_path(&self) -> PathBuf {
        self.model_dir.join(CONDITIONS_FILENAME)
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }
}

/// Parse the default `top_k` from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_TOP_K`].
pub fn top_k_from_env_value(value: Option<String>) -> ClassifierResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_TOP_K),
        Some(v) => v
            .parse::<usize>()
            .ok()
            .filter(|k| *k > 0)
            .ok_or_else(|| {
                ClassifierError::InvalidInput(format!(
                    "top_k must be a positive integer, got '{v}'"
                ))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths_live_in_model_dir() {
        let cfg = CoreConfig::new(PathBuf::from("/tmp/models"), 3).unwrap();
        assert_eq!(
            cfg.pipeline_path(),
            PathBuf::from("/tmp/models/symptom_classifier.json")
        );
        assert_eq!(
            cfg.conditions_path(),
            PathBuf::from("/tmp/models/condition_info.json")
        );
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let result = CoreConfig::new(PathBuf::from("models"), 0);
        assert!(matches!(result, Err(ClassifierError::InvalidInput(_))));
    }

    #[test]
    fn test_top_k_from_env_value() {
        assert_eq!(top_k_from_env_value(None).unwrap(), DEFAULT_TOP_K);
        assert_eq!(top_k_from_env_value(Some("  ".into())).unwrap(), DEFAULT_TOP_K);
        assert_eq!(top_k_from_env_value(Some(" 5 ".into())).unwrap(), 5);
        assert!(top_k_from_env_value(Some("0".into())).is_err());
        assert!(top_k_from_env_value(Some("three".into())).is_err());
    }
}
