// Per-module analysis session.
//
// Idle -> Editing -> Pending -> Resolved | Failed, with reset back to Idle
// from anywhere. A session owns its input fields and the outcome of the
// last submission; the ledger and history it feeds live in SharedState and
// are only borrowed for the duration of a transition.
//
// Submission is split into `begin` (validate, go Pending, hand back a
// ticket) and `complete` (apply the oracle's outcome) so a caller can await
// the oracle however it likes. A completion whose ticket no longer matches
// (the session was reset or replaced meanwhile) is ignored.

use tracing::{debug, warn};

use super::controller::SharedState;
use super::error::AnalysisError;
use super::ledger::RewardLedger;
use crate::models::{AnalysisResult, Feature};
use crate::oracle::prompt::phone_input;
use crate::oracle::{ClassifyRequest, ImageAttachment, OracleError, RiskClassifier};

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    Idle,
    Editing,
    Pending,
    Resolved,
    Failed,
}

#[derive(Debug, Clone)]
enum Outcome {
    None,
    Pending(u64),
    Resolved(AnalysisResult),
    Failed(String),
}

/// An in-flight submission, produced by `AnalysisSession::begin`.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    ticket: u64,
    pub request: ClassifyRequest,
    /// Normalized description of the input, used for history and credit.
    pub identifier: String,
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    feature: Feature,
    text: String,
    phone: String,
    image: Option<ImageAttachment>,
    outcome: Outcome,
    /// Identifier of the input behind the current result.
    resolved_identifier: Option<String>,
    reported: bool,
    next_ticket: u64,
}

impl AnalysisSession {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            text: String::new(),
            phone: String::new(),
            image: None,
            outcome: Outcome::None,
            resolved_identifier: None,
            reported: false,
            next_ticket: 0,
        }
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }

    pub fn state(&self) -> AnalysisState {
        match self.outcome {
            Outcome::None if self.has_input() => AnalysisState::Editing,
            Outcome::None => AnalysisState::Idle,
            Outcome::Pending(_) => AnalysisState::Pending,
            Outcome::Resolved(_) => AnalysisState::Resolved,
            Outcome::Failed(_) => AnalysisState::Failed,
        }
    }

    // --- input fields ---

    /// Message, URL, phone context or notes depending on the module.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: ImageAttachment) {
        self.image = Some(image);
    }

    fn has_input(&self) -> bool {
        !self.text.trim().is_empty() || !self.phone.trim().is_empty() || self.image.is_some()
    }

    // --- outcome ---

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.outcome {
            Outcome::Resolved(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.outcome, Outcome::Pending(_))
    }

    /// Whether "initiate verification" is currently allowed.
    pub fn can_submit(&self) -> bool {
        !self.is_pending() && self.validate().is_ok()
    }

    /// Whether the report action is offered for the displayed result.
    pub fn can_report(&self) -> bool {
        !self.reported && self.result().is_some_and(AnalysisResult::is_scam)
    }

    pub fn reported(&self) -> bool {
        self.reported
    }

    /// Clear inputs, result, error and the report flag. Any in-flight
    /// submission becomes stale.
    pub fn reset(&mut self) {
        self.text.clear();
        self.phone.clear();
        self.image = None;
        self.outcome = Outcome::None;
        self.resolved_identifier = None;
        self.reported = false;
    }

    // --- transitions ---

    /// Check the inputs are complete for this module and build the oracle
    /// text plus the identifier used for history and credit.
    fn validate(&self) -> Result<(String, String), AnalysisError> {
        let text = self.text.trim();
        match self.feature {
            Feature::Sms | Feature::Link => {
                if text.is_empty() {
                    return Err(AnalysisError::MissingText);
                }
                Ok((text.to_string(), text.to_string()))
            }
            Feature::Phone => {
                if self.phone.trim().is_empty() {
                    return Err(AnalysisError::MissingPhone);
                }
                if text.is_empty() {
                    return Err(AnalysisError::MissingContext);
                }
                let labeled = phone_input(&self.phone, text);
                Ok((labeled.clone(), labeled))
            }
            Feature::Screenshot | Feature::PaymentProof => {
                if self.image.is_none() {
                    return Err(AnalysisError::MissingImage);
                }
                let identifier = if text.is_empty() {
                    self.feature
                        .image_placeholder()
                        .unwrap_or_default()
                        .to_string()
                } else {
                    text.to_string()
                };
                Ok((text.to_string(), identifier))
            }
        }
    }

    /// Validate and move to Pending. The previous result, error and report
    /// flag are cleared.
    pub fn begin(&mut self) -> Result<PendingAnalysis, AnalysisError> {
        if self.is_pending() {
            return Err(AnalysisError::InFlight);
        }
        let (text, identifier) = self.validate()?;

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.outcome = Outcome::Pending(ticket);
        self.resolved_identifier = None;
        self.reported = false;

        Ok(PendingAnalysis {
            ticket,
            request: ClassifyRequest {
                feature: self.feature,
                text,
                image: self.image.clone(),
            },
            identifier,
        })
    }

    /// Apply the oracle's outcome. On success the result is recorded in
    /// history and, for a Scam verdict, credited to the ledger.
    ///
    /// Returns false when the submission is stale and nothing changed.
    pub fn complete(
        &mut self,
        pending: PendingAnalysis,
        outcome: Result<AnalysisResult, OracleError>,
        shared: &mut SharedState,
    ) -> bool {
        if !matches!(self.outcome, Outcome::Pending(t) if t == pending.ticket) {
            debug!(
                feature = %self.feature,
                ticket = pending.ticket,
                "Dropping stale oracle response"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                shared.record_result(self.feature, &pending.identifier, result.clone());
                self.resolved_identifier = Some(pending.identifier);
                self.outcome = Outcome::Resolved(result);
            }
            Err(e) => {
                warn!(feature = %self.feature, error = %e, "Analysis failed");
                self.outcome = Outcome::Failed(e.user_message().to_string());
            }
        }
        true
    }

    /// Begin, call the oracle, and complete.
    pub async fn submit(
        &mut self,
        classifier: &dyn RiskClassifier,
        shared: &mut SharedState,
    ) -> Result<(), AnalysisError> {
        let pending = self.begin()?;
        let outcome = classifier.classify(&pending.request).await;
        self.complete(pending, outcome, shared);
        Ok(())
    }

    /// Report the displayed Scam verdict. One use per result; the ledger
    /// additionally refuses to credit the same input twice.
    ///
    /// Returns whether the ledger granted points.
    pub fn report(&mut self, ledger: &mut RewardLedger) -> Result<bool, AnalysisError> {
        if self.reported {
            return Err(AnalysisError::AlreadyReported);
        }
        if !self.result().is_some_and(AnalysisResult::is_scam) {
            return Err(AnalysisError::NothingToReport);
        }
        let identifier = self
            .resolved_identifier
            .as_deref()
            .ok_or(AnalysisError::NothingToReport)?;

        self.reported = true;
        Ok(ledger.credit_report(identifier))
    }

    /// Identifier of the input behind the displayed result.
    pub fn resolved_identifier(&self) -> Option<&str> {
        self.resolved_identifier.as_deref()
    }
}
