//! Persistence for the trained pipeline and its condition metadata table.
//!
//! The two artifacts are written to fixed paths inside the model directory. Each carries a
//! format version and a shared snapshot id generated per save. Each file is written to a
//! temporary sibling and renamed into place, and [`ModelStore::load`] only ever returns a pair
//! whose snapshot ids agree. A save interrupted between the two renames therefore surfaces as
//! a load error rather than as a mixed pair.

use crate::conditions::ConditionTable;
use crate::constants::ARTIFACT_FORMAT_VERSION;
use crate::pipeline::Pipeline;
use crate::{ClassifierError, ClassifierResult, CoreConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A pipeline and the metadata table derived from the same dataset snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    pub pipeline: Pipeline,
    pub conditions: ConditionTable,
}

#[derive(Serialize, Deserialize)]
struct Artifact<T> {
    format_version: u32,
    snapshot_id: Uuid,
    payload: T,
}

/// Reads and writes the artifact pair.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
    pipeline_path: PathBuf,
    conditions_path: PathBuf,
}

impl ModelStore {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self {
            dir: cfg.model_dir().to_path_buf(),
            pipeline_path: cfg.pipeline_path(),
            conditions_path: cfg.conditions_path(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist both artifacts, creating the model directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or an artifact cannot be
    /// serialised, written or renamed into place.
    pub fn save(&self, model: &TrainedModel) -> ClassifierResult<()> {
        fs::create_dir_all(&self.dir).map_err(ClassifierError::ModelDirCreation)?;

        let snapshot_id = Uuid::new_v4();
        let pipeline_bytes = encode(snapshot_id, &model.pipeline)?;
        let conditions_bytes = encode(snapshot_id, &model.conditions)?;

        // Both temp files are fully written before either rename.
        let pipeline_tmp = self.write_temp(&pipeline_bytes)?;
        let conditions_tmp = self.write_temp(&conditions_bytes)?;

        pipeline_tmp
            .persist(&self.pipeline_path)
            .map_err(|e| ClassifierError::ArtifactWrite(e.error))?;
        conditions_tmp
            .persist(&self.conditions_path)
            .map_err(|e| ClassifierError::ArtifactWrite(e.error))?;

        tracing::info!(
            "Model saved to {} (snapshot {})",
            self.pipeline_path.display(),
            snapshot_id
        );
        Ok(())
    }

    fn write_temp(&self, bytes: &[u8]) -> ClassifierResult<tempfile::NamedTempFile> {
        let mut tmp =
            tempfile::NamedTempFile::new_in(&self.dir).map_err(ClassifierError::ArtifactWrite)?;
        tmp.write_all(bytes).map_err(ClassifierError::ArtifactWrite)?;
        tmp.as_file()
            .sync_all()
            .map_err(ClassifierError::ArtifactWrite)?;
        Ok(tmp)
    }

    /// Load the artifact pair.
    ///
    /// Returns `Ok(None)` when neither artifact exists.
    ///
    /// # Errors
    ///
    /// Returns a model load error if only one artifact exists, either cannot be read or
    /// parsed, the format version is unknown, or the two come from different saves.
    pub fn load(&self) -> ClassifierResult<Option<TrainedModel>> {
        let has_pipeline = self.pipeline_path.is_file();
        let has_conditions = self.conditions_path.is_file();

        match (has_pipeline, has_conditions) {
            (false, false) => {
                tracing::info!("No saved model found in {}", self.dir.display());
                return Ok(None);
            }
            (true, false) | (false, true) => {
                return Err(ClassifierError::ModelLoad(format!(
                    "incomplete artifact pair in {}",
                    self.dir.display()
                )));
            }
            (true, true) => {}
        }

        let pipeline: Artifact<Pipeline> = decode(&self.pipeline_path)?;
        let conditions: Artifact<ConditionTable> = decode(&self.conditions_path)?;

        if pipeline.snapshot_id != conditions.snapshot_id {
            tracing::warn!(
                "artifact snapshot mismatch: pipeline {} vs conditions {}",
                pipeline.snapshot_id,
                conditions.snapshot_id
            );
            return Err(ClassifierError::ModelLoad(
                "pipeline and condition metadata come from different training runs".into(),
            ));
        }

        tracing::info!("Model loaded successfully (snapshot {})", pipeline.snapshot_id);
        Ok(Some(TrainedModel {
            pipeline: pipeline.payload,
            conditions: conditions.payload,
        }))
    }
}

fn encode<T: Serialize>(snapshot_id: Uuid, payload: &T) -> ClassifierResult<Vec<u8>> {
    serde_json::to_vec(&Artifact {
        format_version: ARTIFACT_FORMAT_VERSION,
        snapshot_id,
        payload,
    })
    .map_err(ClassifierError::Serialization)
}

fn decode<T: DeserializeOwned>(path: &Path) -> ClassifierResult<Artifact<T>> {
    #[derive(Deserialize)]
    struct Header {
        format_version: u32,
    }

    let bytes = fs::read(path).map_err(ClassifierError::ArtifactRead)?;

    let header: Header = serde_json::from_slice(&bytes).map_err(ClassifierError::Deserialization)?;
    if header.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(ClassifierError::ModelLoad(format!(
            "unsupported artifact format version {} in {} (expected {})",
            header.format_version,
            path.display(),
            ARTIFACT_FORMAT_VERSION
        )));
    }

    serde_json::from_slice(&bytes).map_err(ClassifierError::Deserialization)
}
