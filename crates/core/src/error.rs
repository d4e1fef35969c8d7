#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to load dataset: {0}")]
    DatasetLoad(String),
    #[error("failed to read dataset file: {0}")]
    DatasetRead(csv::Error),

    #[error("training failed: {0}")]
    Training(String),

    #[error("model not trained and no saved model found")]
    ModelNotTrained,

    #[error("failed to load model: {0}")]
    ModelLoad(String),
    #[error("failed to read model artifact: {0}")]
    ArtifactRead(std::io::Error),
    #[error("failed to deserialize model artifact: {0}")]
    Deserialization(serde_json::Error),

    #[error("failed to create model directory: {0}")]
    ModelDirCreation(std::io::Error),
    #[error("failed to write model artifact: {0}")]
    ArtifactWrite(std::io::Error),
    #[error("failed to serialize model artifact: {0}")]
    Serialization(serde_json::Error),
}

impl ClassifierError {
    /// True for failures raised while reading persisted artifacts that exist but cannot be used.
    pub fn is_model_load(&self) -> bool {
        matches!(
            self,
            Self::ModelLoad(_) | Self::ArtifactRead(_) | Self::Deserialization(_)
        )
    }

    /// True for failures raised while reading or validating a dataset file.
    pub fn is_dataset_load(&self) -> bool {
        matches!(self, Self::DatasetLoad(_) | Self::DatasetRead(_))
    }
}

pub type ClassifierResult<T> = std::result::Result<T, ClassifierError>;
