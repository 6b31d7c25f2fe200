// Colored terminal output for verdicts, history, rewards and settings.
//
// This module handles all terminal-specific formatting. The console and the
// one-shot commands in main.rs delegate here.

use std::time::Duration;

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

use crate::models::{AnalysisResult, Feature, RiskLevel};
use crate::session::{
    AnalysisSession, AnalysisState, HistoryLog, RewardLedger, SettingKey, Settings,
};

/// Section heading. Eye comfort mode swaps the stark bold white for a warm tone.
fn heading(text: &str, comfort: bool) -> ColoredString {
    if comfort {
        text.truecolor(230, 200, 140).bold()
    } else {
        text.bold()
    }
}

pub fn display_splash() {
    println!();
    println!("  {}", "SURAKSHA".blue().bold());
    println!("  {}", "AI SCAM GUARD".dimmed());
    println!();
}

pub fn display_login_prompt() {
    println!("{}", "=== Sign in ===".bold());
    println!(
        "{}",
        "Any email and password will do. This is a demo gate.".dimmed()
    );
}

/// The dashboard home: module cards and the rewards summary.
pub fn display_home(user: &str, ledger: &RewardLedger, comfort: bool) {
    let name = user.split('@').next().unwrap_or(user);
    println!(
        "\n{}",
        heading(&format!("=== System Overview: agent {name} ==="), comfort)
    );
    println!();
    for feature in Feature::ALL {
        println!(
            "  {:<22} {}",
            feature.title().bold(),
            feature.description().dimmed()
        );
    }
    println!();
    display_rewards(ledger);
    println!(
        "\n{}",
        "Type `open <sms|link|phone|screenshot|payment>` to start, or `help`.".dimmed()
    );
}

/// The open module: its inputs and whatever outcome it currently shows.
pub fn display_module(session: &AnalysisSession, comfort: bool) {
    let feature = session.feature();
    println!("\n{}", heading(&format!("=== {} ===", feature.title()), comfort));

    match feature {
        Feature::Phone => {
            println!("  Sender phone:      {}", show_field(session.phone()));
            println!("  Fraud description: {}", show_field(session.text()));
        }
        Feature::Screenshot | Feature::PaymentProof => {
            let image = match session.image() {
                Some(img) => format!("{} ({} bytes)", img.mime_type, img.data.len()),
                None => "not selected".dimmed().to_string(),
            };
            println!("  Screenshot: {image}");
            let label = if feature == Feature::PaymentProof {
                "Notes for AI"
            } else {
                "Context"
            };
            println!("  {label}: {}", show_field(session.text()));
        }
        Feature::Sms | Feature::Link => {
            println!("  Input: {}", show_field(session.text()));
        }
    }

    match session.state() {
        AnalysisState::Idle | AnalysisState::Editing => {
            if session.can_submit() {
                println!("\n  {}", "Ready. Type `verify` to initiate verification.".dimmed());
            }
        }
        AnalysisState::Pending => println!("\n  {}", "Processing intelligence...".yellow()),
        AnalysisState::Failed => {
            if let Some(message) = session.error() {
                display_error(message);
            }
        }
        AnalysisState::Resolved => {
            if let Some(result) = session.result() {
                display_result(feature, result);
                display_report_action(session);
            }
        }
    }
}

fn show_field(value: &str) -> String {
    if value.trim().is_empty() {
        "(empty)".dimmed().to_string()
    } else {
        super::truncate_chars(value, 80)
    }
}

/// Display a verdict with its reasons and recommendation.
pub fn display_result(feature: Feature, result: &AnalysisResult) {
    let verdict = feature.verdict_label(result.risk_level);
    println!(
        "\n  {} {}  {}",
        risk_icon(result.risk_level),
        format!("Verdict: {}", verdict.to_uppercase()).bold(),
        format!("{}% confidence", result.confidence_score).dimmed()
    );

    println!("\n  {}", "Reasoning".dimmed());
    for reason in &result.reasons {
        println!("    {} {}", "•".blue(), reason);
    }

    println!("\n  {}", "Safety recommendation".dimmed());
    println!("    \"{}\"", colorize_risk(result.risk_level, &result.recommendation));

    if feature == Feature::PaymentProof {
        println!(
            "\n  {}",
            "Verification assisted by Suraksha Shop Security Protocol".dimmed()
        );
    }
}

fn display_report_action(session: &AnalysisSession) {
    if session.can_report() {
        println!("\n  {}", "Type `report` to report this threat (+10).".red());
    } else if session.reported() {
        let subject = session.resolved_identifier().unwrap_or_default();
        println!(
            "\n  {}",
            format!("Threat reported: {}", super::truncate_chars(subject, 60)).dimmed()
        );
    }
}

pub fn display_error(message: &str) {
    println!("  {} {}", "!".red().bold(), message.red());
}

/// Display the activity history, newest first.
pub fn display_history(history: &HistoryLog) {
    println!("\n{}", format!("=== Recent Activity ({}) ===", history.len()).bold());
    if history.is_empty() {
        println!("  {}", "No scans yet.".dimmed());
        return;
    }
    for item in history.iter() {
        let local = item.timestamp.with_timezone(&chrono::Local);
        println!(
            "  {}  {:<13} {:<11} {}",
            local.format("%H:%M").to_string().dimmed(),
            item.feature.history_label(),
            colorize_risk(item.result.risk_level, item.result.risk_level.as_str()),
            super::truncate_chars(&item.input, 60),
        );
    }
}

pub fn display_rewards(ledger: &RewardLedger) {
    println!(
        "  {} {} points   {} {} scams reported",
        "★".yellow(),
        ledger.points().to_string().bold(),
        "⚑".red(),
        ledger.report_count().to_string().bold()
    );
}

pub fn display_settings(settings: &Settings) {
    println!("\n{}", heading("=== Settings & Security ===", settings.comfort_mode));
    for key in SettingKey::ALL {
        let state = if settings.get(key) {
            "on".green()
        } else {
            "off".dimmed()
        };
        println!("  {:<20} {:<4} ({})", key.label(), state, key.name().dimmed());
    }
    println!("\n{}", "Type `toggle <name>` to flip a setting.".dimmed());
}

fn risk_icon(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Safe => "✓".green().bold(),
        RiskLevel::Suspicious => "!".yellow().bold(),
        RiskLevel::Scam => "×".red().bold(),
    }
}

/// Color text by the risk level it describes.
fn colorize_risk(level: RiskLevel, text: &str) -> ColoredString {
    match level {
        RiskLevel::Safe => text.green(),
        RiskLevel::Suspicious => text.yellow(),
        RiskLevel::Scam => text.red().bold(),
    }
}

/// Spinner shown while an oracle call is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Live alert banner for a Scam verdict.
pub fn display_alert(feature: Feature) {
    println!(
        "\n  {} {}",
        "ALERT".on_red().white().bold(),
        format!(
            "{} flagged as a scam. Do not pay, share OTPs or click links.",
            feature.title()
        )
        .red()
    );
}
