// Google Gemini implementation of the classification oracle.
//
// Each call is a single generateContent request: the policy preamble rides
// along as the system instruction, the image (if any) goes in as an inline
// data part, and the model is told to answer with application/json only.
//
// API docs: https://ai.google.dev/api/generate-content

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::OracleError;
use super::prompt::{build_prompt, POLICY_PREAMBLE};
use super::response::parse_analysis;
use super::traits::{ClassifyRequest, RiskClassifier};
use crate::models::AnalysisResult;
use crate::output::truncate_chars;

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini generateContent classifier.
pub struct GeminiClassifier {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClassifier {
    /// Create a classifier for the given endpoint, key and model.
    pub fn new(base_url: &str, api_key: String, model: String) -> Result<Self, OracleError> {
        let client = Client::builder()
            .user_agent(concat!("suraksha/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Assemble the request body for one classification.
    fn build_request(&self, request: &ClassifyRequest) -> GenerateContentRequest {
        let prompt = build_prompt(request.feature, &request.text, Local::now().date_naive());

        let mut parts = Vec::with_capacity(2);
        if let Some(image) = &request.image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.to_base64(),
                },
            });
        }
        parts.push(Part::Text { text: prompt });

        GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part::Text {
                    text: POLICY_PREAMBLE.to_string(),
                }],
            },
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

#[async_trait]
impl RiskClassifier for GeminiClassifier {
    async fn classify(&self, request: &ClassifyRequest) -> Result<AnalysisResult, OracleError> {
        let body = self.build_request(request);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Status { status, body });
        }

        let reply: GenerateContentResponse = response.json().await?;
        let text = reply.text().ok_or(OracleError::EmptyResponse)?;

        let result = parse_analysis(&text)?;

        debug!(
            feature = %request.feature,
            risk_level = %result.risk_level,
            confidence = result.confidence_score,
            input_preview = %truncate_chars(&request.text, 50),
            "Classified input"
        );

        Ok(result)
    }
}

// --- generateContent request/response types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
