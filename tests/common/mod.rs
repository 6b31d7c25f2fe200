// Shared test helpers: a scripted stand-in for the oracle.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use suraksha::models::{AnalysisResult, RiskLevel};
use suraksha::oracle::{ClassifyRequest, OracleError, RiskClassifier};

/// A verdict with a confidence in the middle of its policy band.
pub fn verdict(level: RiskLevel) -> AnalysisResult {
    let confidence_score = match level {
        RiskLevel::Safe => 95,
        RiskLevel::Suspicious => 55,
        RiskLevel::Scam => 90,
    };
    AnalysisResult {
        risk_level: level,
        confidence_score,
        reasons: vec![format!("{level} reason")],
        recommendation: format!("{level} advice"),
    }
}

/// Replies with queued outcomes in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedClassifier {
    replies: Mutex<VecDeque<Result<AnalysisResult, String>>>,
    requests: Mutex<Vec<ClassifyRequest>>,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(level: RiskLevel) -> Self {
        let classifier = Self::new();
        classifier.push_ok(verdict(level));
        classifier
    }

    pub fn push_ok(&self, result: AnalysisResult) {
        self.replies.lock().unwrap().push_back(Ok(result));
    }

    pub fn push_err(&self, cause: &str) {
        self.replies.lock().unwrap().push_back(Err(cause.to_string()));
    }

    pub fn requests(&self) -> Vec<ClassifyRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RiskClassifier for ScriptedClassifier {
    async fn classify(&self, request: &ClassifyRequest) -> Result<AnalysisResult, OracleError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Ok(result)) => Ok(result),
            Some(Err(cause)) => Err(OracleError::Shape(cause)),
            None => Err(OracleError::EmptyResponse),
        }
    }
}
