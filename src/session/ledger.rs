// Reward and report ledger: points, report count and per-input dedup.
//
// Points are granted for two things: a Scam verdict on an input (detection)
// and the user explicitly reporting a Scam (report). Each is granted at most
// once per normalized input, tracked in one set with a namespace prefix per
// credit kind so both can apply to the same input exactly once.

use std::collections::HashSet;

use tracing::info;

/// Points for a Scam verdict on a new input.
pub const DETECTION_POINTS: u32 = 5;
/// Points for reporting a Scam.
pub const REPORT_POINTS: u32 = 10;

const DETECTION_PREFIX: &str = "detect:";
const REPORT_PREFIX: &str = "report:";

/// Trim and lower-case an input into its dedup key.
pub fn normalize_key(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Process-wide reward counters. Never decremented.
#[derive(Debug, Clone, Default)]
pub struct RewardLedger {
    points: u32,
    report_count: u32,
    credited: HashSet<String>,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn report_count(&self) -> u32 {
        self.report_count
    }

    /// Grant detection credit for `input` unless it already has it.
    /// Returns true when points were added.
    pub fn credit_detection(&mut self, input: &str) -> bool {
        let key = normalize_key(input);
        if key.is_empty() || !self.credited.insert(format!("{DETECTION_PREFIX}{key}")) {
            return false;
        }
        self.points += DETECTION_POINTS;
        info!(points = self.points, "Detection credit granted");
        true
    }

    /// Grant report credit for `input` unless it already has it.
    /// Returns true when points were added and the report counted.
    pub fn credit_report(&mut self, input: &str) -> bool {
        let key = normalize_key(input);
        if key.is_empty() || !self.credited.insert(format!("{REPORT_PREFIX}{key}")) {
            return false;
        }
        self.points += REPORT_POINTS;
        self.report_count += 1;
        info!(
            points = self.points,
            reports = self.report_count,
            "Report credit granted"
        );
        true
    }

    pub fn has_detection_credit(&self, input: &str) -> bool {
        self.credited
            .contains(&format!("{DETECTION_PREFIX}{}", normalize_key(input)))
    }

    pub fn has_report_credit(&self, input: &str) -> bool {
        self.credited
            .contains(&format!("{REPORT_PREFIX}{}", normalize_key(input)))
    }
}
