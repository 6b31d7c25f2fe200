// Risk classifier trait. Swap implementations without touching the session code.

use async_trait::async_trait;

use super::error::OracleError;
use super::image::ImageAttachment;
use crate::models::{AnalysisResult, Feature};

/// Everything the oracle needs for one classification.
#[derive(Debug, Clone)]
pub struct ClassifyRequest {
    pub feature: Feature,
    /// Module-specific text. For PHONE this is already the labeled
    /// `Phone: .. | Context: ..` string; for image modules it may be empty.
    pub text: String,
    pub image: Option<ImageAttachment>,
}

/// Trait for classifying user input as Safe / Suspicious / Scam.
/// Implementations must be async because the oracle sits behind an HTTP API.
#[async_trait]
pub trait RiskClassifier: Send + Sync {
    /// Classify a single input. Any transport, status or shape problem is
    /// reported as an `OracleError`, never papered over with a default verdict.
    async fn classify(&self, request: &ClassifyRequest) -> Result<AnalysisResult, OracleError>;
}
