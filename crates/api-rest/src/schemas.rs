//! Request and response bodies for the REST API.

use serde::{Deserialize, Serialize};
use symptom_core::{ModelInfo, Prediction};
use utoipa::ToSchema;

fn default_severity() -> u8 {
    5
}

fn default_duration() -> String {
    "recent".into()
}

fn default_user_id() -> String {
    "anonymous".into()
}

/// Free-text symptoms submitted for analysis.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SymptomInput {
    pub symptoms: String,
    /// 1-10 scale.
    #[serde(default = "default_severity")]
    pub severity: u8,
    /// recent, days, weeks or months.
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConditionPrediction {
    pub condition: String,
    pub probability: f64,
    pub description: String,
    /// routine, urgent or emergency.
    pub urgency: String,
    pub recommendations: Vec<String>,
}

impl From<Prediction> for ConditionPrediction {
    fn from(p: Prediction) -> Self {
        Self {
            condition: p.condition,
            probability: p.probability,
            description: p.description,
            urgency: p.urgency.as_str().to_string(),
            recommendations: p.recommendations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SymptomResponse {
    pub predictions: Vec<ConditionPrediction>,
    /// Highest urgency across predictions.
    pub urgency: String,
    pub recommendations: Vec<String>,
    pub timestamp: String,
    pub model_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootRes {
    pub message: String,
    pub status: String,
    pub docs: String,
}

/// One analysed request, as remembered for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub symptoms: String,
    pub severity: u8,
    pub duration: String,
    pub timestamp: String,
    pub predictions: Vec<ConditionPrediction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserHistoryRes {
    pub user_id: String,
    pub entries: Vec<HistoryEntry>,
    pub total_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelInfoRes {
    /// trained or not_trained.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_conditions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
}

impl From<ModelInfo> for ModelInfoRes {
    fn from(info: ModelInfo) -> Self {
        match info {
            ModelInfo::NotTrained => Self {
                status: "not_trained".into(),
                total_conditions: None,
                conditions: None,
                model_type: None,
            },
            ModelInfo::Trained {
                total_conditions,
                conditions,
                model_type,
            } => Self {
                status: "trained".into(),
                total_conditions: Some(total_conditions),
                conditions: Some(conditions),
                model_type: Some(model_type),
            },
        }
    }
}
