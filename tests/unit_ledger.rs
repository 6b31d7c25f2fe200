// Unit tests for the reward & report ledger and the bounded history.
//
// Covers idempotent detection and report credit, namespace independence
// between the two credit kinds, dedup key normalization, and history
// truncation order.

mod common;

use suraksha::models::{Feature, HistoryItem, RiskLevel};
use suraksha::session::history::HISTORY_CAPACITY;
use suraksha::session::ledger::{normalize_key, DETECTION_POINTS, REPORT_POINTS};
use suraksha::session::{HistoryLog, RewardLedger};

// ============================================================
// Detection credit
// ============================================================

#[test]
fn detection_credit_is_granted_once_per_input() {
    let mut ledger = RewardLedger::new();
    assert!(ledger.credit_detection("Your KYC expires today, share OTP"));
    assert!(!ledger.credit_detection("Your KYC expires today, share OTP"));
    assert_eq!(ledger.points(), 5);
    assert_eq!(ledger.report_count(), 0);
}

#[test]
fn distinct_inputs_each_earn_detection_credit() {
    let mut ledger = RewardLedger::new();
    ledger.credit_detection("first scam");
    ledger.credit_detection("second scam");
    assert_eq!(ledger.points(), 2 * DETECTION_POINTS);
}

#[test]
fn blank_input_never_earns_credit() {
    let mut ledger = RewardLedger::new();
    assert!(!ledger.credit_detection("   "));
    assert!(!ledger.credit_report(""));
    assert_eq!(ledger.points(), 0);
    assert_eq!(ledger.report_count(), 0);
}

// ============================================================
// Report credit
// ============================================================

#[test]
fn report_credit_is_granted_once_per_input() {
    let mut ledger = RewardLedger::new();
    assert!(ledger.credit_report("http://sbi-kyc-update.xyz"));
    assert!(!ledger.credit_report("http://sbi-kyc-update.xyz"));
    assert!(!ledger.credit_report("http://sbi-kyc-update.xyz"));
    assert_eq!(ledger.points(), 10);
    assert_eq!(ledger.report_count(), 1);
}

#[test]
fn detection_and_report_apply_independently_to_same_input() {
    let mut ledger = RewardLedger::new();
    assert!(ledger.credit_detection("lottery winner"));
    assert!(ledger.credit_report("lottery winner"));
    assert!(!ledger.credit_detection("lottery winner"));
    assert!(!ledger.credit_report("lottery winner"));
    assert_eq!(ledger.points(), DETECTION_POINTS + REPORT_POINTS);
    assert_eq!(ledger.points(), 15);
    assert_eq!(ledger.report_count(), 1);
}

#[test]
fn report_first_then_detection_still_both_apply() {
    let mut ledger = RewardLedger::new();
    ledger.credit_report("prize");
    assert!(!ledger.has_detection_credit("prize"));
    ledger.credit_detection("prize");
    assert!(ledger.has_detection_credit("prize"));
    assert!(ledger.has_report_credit("prize"));
    assert_eq!(ledger.points(), 15);
}

#[test]
fn input_resembling_a_namespace_prefix_does_not_collide() {
    let mut ledger = RewardLedger::new();
    // A literal input that looks like a namespaced key is its own input.
    assert!(ledger.credit_detection("report:prize"));
    assert!(ledger.credit_report("prize"));
    assert_eq!(ledger.points(), 15);
}

// ============================================================
// Normalization
// ============================================================

#[test]
fn case_and_whitespace_variants_share_one_key() {
    assert_eq!(normalize_key("Win Free Prize"), "win free prize");
    assert_eq!(normalize_key(" win free prize "), "win free prize");
    assert_eq!(normalize_key("WIN FREE PRIZE"), "win free prize");
}

#[test]
fn case_and_whitespace_variants_share_one_credit() {
    let mut ledger = RewardLedger::new();
    assert!(ledger.credit_detection("Win Free Prize"));
    assert!(!ledger.credit_detection(" win free prize "));
    assert!(!ledger.credit_detection("WIN FREE PRIZE"));
    assert!(ledger.credit_report("WIN FREE PRIZE"));
    assert!(!ledger.credit_report("Win Free Prize"));
    assert_eq!(ledger.points(), 15);
    assert_eq!(ledger.report_count(), 1);
}

// ============================================================
// History
// ============================================================

fn item(n: usize) -> HistoryItem {
    HistoryItem::new(
        Feature::Sms,
        format!("message {n}"),
        common::verdict(RiskLevel::Safe),
    )
}

#[test]
fn history_keeps_ten_most_recent_newest_first() {
    let mut history = HistoryLog::new();
    for n in 1..=15 {
        history.append(item(n));
    }

    assert_eq!(history.len(), HISTORY_CAPACITY);
    let inputs: Vec<&str> = history.iter().map(|i| i.input.as_str()).collect();
    let expected: Vec<String> = (6..=15).rev().map(|n| format!("message {n}")).collect();
    assert_eq!(inputs, expected);
}

#[test]
fn history_orders_by_insertion_not_timestamp() {
    let mut history = HistoryLog::new();
    let mut older = item(1);
    let newer = item(2);
    // Appended last, but stamped earlier than everything else.
    older.timestamp = newer.timestamp - chrono::Duration::hours(1);
    history.append(newer);
    history.append(older);
    assert_eq!(history.latest().unwrap().input, "message 1");
}

#[test]
fn history_below_capacity_keeps_everything() {
    let mut history = HistoryLog::new();
    assert!(history.is_empty());
    for n in 1..=3 {
        history.append(item(n));
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.latest().unwrap().input, "message 3");
}
