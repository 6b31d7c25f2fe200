// Data models: the types that flow between the oracle, the session state
// machines and the terminal output.
//
// These are kept separate from the oracle client so the session and output
// modules can use them without depending on reqwest.

use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The verdict returned by the classification oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Suspicious,
    Scam,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Suspicious => "Suspicious",
            RiskLevel::Scam => "Scam",
        }
    }

    /// Confidence band the policy preamble asks the oracle to honor.
    pub fn confidence_band(&self) -> RangeInclusive<u8> {
        match self {
            RiskLevel::Safe => 90..=100,
            RiskLevel::Suspicious => 40..=70,
            RiskLevel::Scam => 80..=95,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated classification result.
///
/// Construct through `oracle::response::parse_analysis` when the data comes
/// from the oracle; that is where the shape checks live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    /// 0-100
    pub confidence_score: u8,
    /// Never empty
    pub reasons: Vec<String>,
    pub recommendation: String,
}

impl AnalysisResult {
    /// Whether the confidence score sits inside the policy band for its risk level.
    pub fn within_policy_band(&self) -> bool {
        self.risk_level
            .confidence_band()
            .contains(&self.confidence_score)
    }

    pub fn is_scam(&self) -> bool {
        self.risk_level == RiskLevel::Scam
    }
}

/// The five analysis modules offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    Sms,
    Link,
    Phone,
    Screenshot,
    PaymentProof,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Sms,
        Feature::Link,
        Feature::Phone,
        Feature::Screenshot,
        Feature::PaymentProof,
    ];

    /// Dashboard card title.
    pub fn title(&self) -> &'static str {
        match self {
            Feature::Sms => "Message Analysis",
            Feature::Link => "Link Analysis",
            Feature::Phone => "Phone Check",
            Feature::Screenshot => "Screenshot Analysis",
            Feature::PaymentProof => "Payment Verification",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Feature::Sms => "Scan for fraudulent SMS text, phishing links, and fake bank alerts.",
            Feature::Link => "Verify URLs against known scam patterns and malicious redirects.",
            Feature::Phone => "Analyze phone numbers and payment scenarios for fraud risks.",
            Feature::Screenshot => {
                "Extract and analyze text from images to detect hidden scam signals."
            }
            Feature::PaymentProof => {
                "Verify UPI and GPay screenshots to prevent payment manipulation."
            }
        }
    }

    /// Label shown next to history entries.
    pub fn history_label(&self) -> &'static str {
        match self {
            Feature::Sms => "SMS",
            Feature::Link => "Link",
            Feature::Phone => "Phone",
            Feature::Screenshot => "Screenshot",
            Feature::PaymentProof => "Payment Proof",
        }
    }

    /// Whether the module cannot be submitted without an attached image.
    pub fn requires_image(&self) -> bool {
        matches!(self, Feature::Screenshot | Feature::PaymentProof)
    }

    /// Identifier recorded when an image module is submitted without text.
    pub fn image_placeholder(&self) -> Option<&'static str> {
        match self {
            Feature::Screenshot => Some("Image Scan"),
            Feature::PaymentProof => Some("Payment Verification"),
            _ => None,
        }
    }

    /// How a verdict is worded for this module. Payment proofs speak the
    /// shop owner's language rather than the generic risk level.
    pub fn verdict_label(&self, level: RiskLevel) -> &'static str {
        match (self, level) {
            (Feature::PaymentProof, RiskLevel::Safe) => "Genuine",
            (Feature::PaymentProof, RiskLevel::Suspicious) => "Verification Needed",
            (Feature::PaymentProof, RiskLevel::Scam) => "Tampered / Fake",
            (_, level) => level.as_str(),
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.history_label())
    }
}

impl FromStr for Feature {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sms" | "message" => Ok(Feature::Sms),
            "link" | "url" => Ok(Feature::Link),
            "phone" => Ok(Feature::Phone),
            "screenshot" | "image" => Ok(Feature::Screenshot),
            "payment" | "payment-proof" | "payment_proof" => Ok(Feature::PaymentProof),
            other => anyhow::bail!(
                "Unknown module '{other}'. Expected one of: sms, link, phone, screenshot, payment"
            ),
        }
    }
}

/// One past classification, shown in the dashboard's activity panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub feature: Feature,
    /// Normalized description of what was analyzed
    pub input: String,
    pub result: AnalysisResult,
}

impl HistoryItem {
    /// Create a history entry stamped with a fresh id and the current time.
    pub fn new(feature: Feature, input: impl Into<String>, result: AnalysisResult) -> Self {
        Self {
            id: random_id(),
            timestamp: Utc::now(),
            feature,
            input: input.into(),
            result,
        }
    }
}

/// A 9-character lowercase base-36 token.
fn random_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    (0..9)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
