// Oracle reply validation.
//
// The oracle is untrusted input. Its JSON is decoded into a loose wire type
// first and then checked field by field, so a missing field, an unknown
// risk level or an empty reason list is an explicit error rather than a
// silently defaulted verdict.

use serde::Deserialize;
use tracing::warn;

use super::error::OracleError;
use crate::models::{AnalysisResult, RiskLevel};

#[derive(Deserialize)]
struct WireAnalysis {
    risk_level: Option<String>,
    confidence_score: Option<serde_json::Number>,
    reasons: Option<Vec<String>>,
    recommendation: Option<String>,
}

/// Parse and validate the oracle's JSON text into an `AnalysisResult`.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, OracleError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(OracleError::EmptyResponse);
    }

    let wire: WireAnalysis = serde_json::from_str(text)?;

    let risk_level = match wire.risk_level.as_deref().map(str::trim) {
        Some("Safe") => RiskLevel::Safe,
        Some("Suspicious") => RiskLevel::Suspicious,
        Some("Scam") => RiskLevel::Scam,
        Some(other) => {
            return Err(OracleError::Shape(format!(
                "unrecognized risk_level '{other}'"
            )))
        }
        None => return Err(OracleError::Shape("missing risk_level".to_string())),
    };

    let confidence_score = wire
        .confidence_score
        .as_ref()
        .and_then(serde_json::Number::as_f64)
        .ok_or_else(|| OracleError::Shape("missing confidence_score".to_string()))?;
    if !(0.0..=100.0).contains(&confidence_score) {
        return Err(OracleError::Shape(format!(
            "confidence_score {confidence_score} outside 0-100"
        )));
    }
    let confidence_score = confidence_score.round() as u8;

    let reasons = wire
        .reasons
        .ok_or_else(|| OracleError::Shape("missing reasons".to_string()))?;
    if reasons.is_empty() {
        return Err(OracleError::Shape("reasons must not be empty".to_string()));
    }

    let recommendation = wire
        .recommendation
        .ok_or_else(|| OracleError::Shape("missing recommendation".to_string()))?;

    let result = AnalysisResult {
        risk_level,
        confidence_score,
        reasons,
        recommendation,
    };

    if !result.within_policy_band() {
        // Logged, not enforced.
        warn!(
            risk_level = %result.risk_level,
            confidence_score = result.confidence_score,
            "Oracle confidence outside policy band"
        );
    }

    Ok(result)
}
