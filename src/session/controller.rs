// Top-level session controller.
//
// Owns the navigation state, the process-wide SharedState (ledger, history,
// settings) and the analysis session of the open module. Module views never
// hold their own copies of the shared state; every mutation goes through
// this controller or a borrow it hands out.
//
// Ledger and history are scoped to the process, not to the signed-in
// identity: signing out and back in keeps both.

use tracing::info;

use super::analysis::AnalysisSession;
use super::error::SessionError;
use super::history::HistoryLog;
use super::ledger::RewardLedger;
use super::navigation::{Navigator, Screen};
use super::settings::{SettingKey, Settings};
use crate::models::{AnalysisResult, Feature, HistoryItem};
use crate::oracle::RiskClassifier;

/// State shared by every module for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    pub ledger: RewardLedger,
    pub history: HistoryLog,
    pub settings: Settings,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful classification: append it to history and, for
    /// a Scam verdict, grant detection credit for the input.
    pub fn record_result(
        &mut self,
        feature: Feature,
        identifier: &str,
        result: AnalysisResult,
    ) -> HistoryItem {
        if result.is_scam() {
            self.ledger.credit_detection(identifier);
        }
        info!(
            feature = %feature,
            risk_level = %result.risk_level,
            confidence = result.confidence_score,
            "Recorded analysis"
        );
        let item = HistoryItem::new(feature, identifier, result);
        self.history.append(item.clone());
        item
    }
}

#[derive(Debug, Default)]
pub struct SessionController {
    navigator: Navigator,
    shared: SharedState,
    analysis: Option<AnalysisSession>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn screen(&self) -> Screen {
        self.navigator.screen()
    }

    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    pub fn analysis(&self) -> Option<&AnalysisSession> {
        self.analysis.as_ref()
    }

    pub fn analysis_mut(&mut self) -> Result<&mut AnalysisSession, SessionError> {
        self.analysis.as_mut().ok_or(SessionError::NoModuleOpen)
    }

    // --- navigation ---

    pub fn intro_elapsed(&mut self) -> bool {
        self.navigator.intro_elapsed()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<(), SessionError> {
        Ok(self.navigator.login(email, password)?)
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.navigator.logout()?;
        self.analysis = None;
        Ok(())
    }

    /// Open a module. Switching to a different module starts a fresh
    /// session; re-selecting the open module keeps its state.
    pub fn select_module(&mut self, feature: Feature) -> Result<(), SessionError> {
        self.navigator.select_module(feature)?;
        if self.analysis.as_ref().map(AnalysisSession::feature) != Some(feature) {
            self.analysis = Some(AnalysisSession::new(feature));
        }
        Ok(())
    }

    pub fn open_settings(&mut self) -> Result<(), SessionError> {
        self.navigator.open_settings()?;
        self.analysis = None;
        Ok(())
    }

    pub fn go_home(&mut self) -> Result<(), SessionError> {
        self.navigator.go_home()?;
        self.analysis = None;
        Ok(())
    }

    // --- module actions ---

    /// Run the open module's analysis against the oracle.
    pub async fn verify(&mut self, classifier: &dyn RiskClassifier) -> Result<(), SessionError> {
        let analysis = self.analysis.as_mut().ok_or(SessionError::NoModuleOpen)?;
        analysis.submit(classifier, &mut self.shared).await?;
        Ok(())
    }

    /// Report the open module's Scam verdict. Returns whether points were granted.
    pub fn report(&mut self) -> Result<bool, SessionError> {
        let analysis = self.analysis.as_mut().ok_or(SessionError::NoModuleOpen)?;
        Ok(analysis.report(&mut self.shared.ledger)?)
    }

    pub fn toggle_setting(&mut self, key: SettingKey) -> bool {
        self.shared.settings.toggle(key)
    }
}
