// Composition tests: the session controller driven end to end.
//
// These tests chain navigation, analysis sessions, the reward ledger and
// history through SessionController (and the console's command layer) with
// a scripted classifier standing in for the oracle. No network access.

mod common;

use chrono::Local;
use common::{verdict, ScriptedClassifier};
use suraksha::console::{execute, Command};
use suraksha::models::{Feature, RiskLevel};
use suraksha::oracle::error::USER_FACING_MESSAGE;
use suraksha::oracle::prompt::{build_prompt, format_prompt_date, POLICY_PREAMBLE};
use suraksha::oracle::ImageAttachment;
use suraksha::session::{
    AnalysisError, AnalysisState, DashboardView, NavigationError, Screen, SessionController,
    SessionError, SettingKey,
};

/// A controller already past the splash and signed in.
fn signed_in() -> SessionController {
    let mut controller = SessionController::new();
    assert!(controller.intro_elapsed());
    controller.login("agent@suraksha.in", "hunter2").unwrap();
    controller
}

async fn analyze_sms(
    controller: &mut SessionController,
    classifier: &ScriptedClassifier,
    text: &str,
) {
    controller.select_module(Feature::Sms).unwrap();
    controller.analysis_mut().unwrap().set_text(text);
    controller.verify(classifier).await.unwrap();
}

// ============================================================
// Navigation
// ============================================================

#[test]
fn intro_login_dashboard_flow() {
    let mut controller = SessionController::new();
    assert_eq!(controller.screen(), Screen::Intro);
    assert!(matches!(
        controller.login("a@b.c", "pw"),
        Err(SessionError::Navigation(NavigationError::NotOnLogin))
    ));

    assert!(controller.intro_elapsed());
    assert!(!controller.intro_elapsed());
    assert_eq!(controller.screen(), Screen::Login);

    assert!(matches!(
        controller.login("  ", "pw"),
        Err(SessionError::Navigation(NavigationError::MissingCredentials))
    ));
    assert!(matches!(
        controller.login("a@b.c", ""),
        Err(SessionError::Navigation(NavigationError::MissingCredentials))
    ));
    assert_eq!(controller.screen(), Screen::Login);

    controller.login(" agent@suraksha.in ", "x").unwrap();
    assert_eq!(controller.screen(), Screen::Dashboard);
    assert_eq!(controller.navigator().user(), Some("agent@suraksha.in"));
    assert_eq!(controller.navigator().view(), DashboardView::Home);
}

#[test]
fn dashboard_actions_require_sign_in() {
    let mut controller = SessionController::new();
    controller.intro_elapsed();
    assert!(controller.select_module(Feature::Sms).is_err());
    assert!(controller.open_settings().is_err());
    assert!(controller.analysis().is_none());
}

#[test]
fn module_and_settings_are_mutually_exclusive() {
    let mut controller = signed_in();

    controller.select_module(Feature::Link).unwrap();
    assert_eq!(controller.navigator().selected_module(), Some(Feature::Link));
    assert!(!controller.navigator().settings_open());
    assert!(controller.analysis().is_some());

    controller.open_settings().unwrap();
    assert!(controller.navigator().settings_open());
    assert_eq!(controller.navigator().selected_module(), None);
    assert!(controller.analysis().is_none());

    controller.select_module(Feature::Phone).unwrap();
    assert!(!controller.navigator().settings_open());

    controller.go_home().unwrap();
    assert_eq!(controller.navigator().view(), DashboardView::Home);
    assert!(matches!(
        controller.analysis_mut(),
        Err(SessionError::NoModuleOpen)
    ));
}

#[tokio::test]
async fn logout_keeps_points_and_history() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Scam);
    let mut controller = signed_in();
    analyze_sms(&mut controller, &classifier, "Send OTP now or account closes").await;
    assert_eq!(controller.shared().ledger.points(), 5);

    controller.logout().unwrap();
    assert_eq!(controller.screen(), Screen::Login);
    assert_eq!(controller.navigator().user(), None);
    assert!(controller.analysis().is_none());

    controller.login("someone@else.in", "pw").unwrap();
    assert_eq!(controller.shared().ledger.points(), 5);
    assert_eq!(controller.shared().history.len(), 1);
}

// ============================================================
// Scenarios
// ============================================================

#[tokio::test]
async fn safe_sms_earns_nothing() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Safe);
    let mut controller = signed_in();
    analyze_sms(&mut controller, &classifier, "Hi, are we meeting tomorrow?").await;

    let session = controller.analysis().unwrap();
    assert_eq!(session.state(), AnalysisState::Resolved);
    assert_eq!(session.result().unwrap().risk_level, RiskLevel::Safe);
    assert!(!session.can_report());
    assert_eq!(controller.shared().ledger.points(), 0);
    assert_eq!(controller.shared().history.len(), 1);
    assert_eq!(
        controller.shared().history.latest().unwrap().feature,
        Feature::Sms
    );
}

#[tokio::test]
async fn scam_sms_detect_then_report() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Scam);
    let mut controller = signed_in();
    analyze_sms(
        &mut controller,
        &classifier,
        "Dear customer your SBI account is blocked. Share OTP at bit.ly/x urgently",
    )
    .await;
    assert_eq!(controller.shared().ledger.points(), 5);

    assert!(controller.report().unwrap());
    assert_eq!(controller.shared().ledger.points(), 15);
    assert_eq!(controller.shared().ledger.report_count(), 1);

    assert!(matches!(
        controller.report(),
        Err(SessionError::Analysis(AnalysisError::AlreadyReported))
    ));
    assert_eq!(controller.shared().ledger.points(), 15);
}

#[tokio::test]
async fn reanalysis_of_same_input_never_double_credits() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Scam);
    let text = "You won a lottery! Pay processing fee to claim";
    let mut controller = signed_in();

    analyze_sms(&mut controller, &classifier, text).await;
    controller.report().unwrap();

    // Remount the module and analyze the same message again.
    controller.go_home().unwrap();
    classifier.push_ok(verdict(RiskLevel::Scam));
    analyze_sms(&mut controller, &classifier, text).await;
    assert!(!controller.report().unwrap());

    assert_eq!(controller.shared().ledger.points(), 15);
    assert_eq!(controller.shared().ledger.report_count(), 1);
    assert_eq!(controller.shared().history.len(), 2);
    assert_eq!(classifier.call_count(), 2);
}

#[tokio::test]
async fn trusted_link_is_safe_and_preamble_pins_it() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Safe);
    let mut controller = signed_in();
    controller.select_module(Feature::Link).unwrap();
    controller.analysis_mut().unwrap().set_text("https://www.amazon.in/orders");
    controller.verify(&classifier).await.unwrap();

    let requests = classifier.requests();
    let request = &requests[0];
    assert_eq!(request.feature, Feature::Link);
    assert_eq!(request.text, "https://www.amazon.in/orders");
    assert!(POLICY_PREAMBLE.contains("amazon.in"));
    assert_eq!(
        controller.analysis().unwrap().result().unwrap().risk_level,
        RiskLevel::Safe
    );
}

#[tokio::test]
async fn payment_proof_prompt_carries_todays_date() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Safe);
    let mut controller = signed_in();
    controller.select_module(Feature::PaymentProof).unwrap();
    controller
        .analysis_mut()
        .unwrap()
        .set_image(ImageAttachment::new("image/png", vec![1, 2, 3, 4]));
    controller.verify(&classifier).await.unwrap();

    let requests = classifier.requests();
    let request = &requests[0];
    assert!(request.image.is_some());

    let today = Local::now().date_naive();
    let prompt = build_prompt(request.feature, &request.text, today);
    assert!(prompt.contains(&format_prompt_date(today)));

    let history = &controller.shared().history;
    assert_eq!(history.latest().unwrap().input, "Payment Verification");
    assert_eq!(
        Feature::PaymentProof.verdict_label(RiskLevel::Safe),
        "Genuine"
    );
}

#[tokio::test]
async fn phone_without_context_never_reaches_the_oracle() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Scam);
    let mut controller = signed_in();
    controller.select_module(Feature::Phone).unwrap();
    controller.analysis_mut().unwrap().set_phone("+911234567890");

    assert!(matches!(
        controller.verify(&classifier).await,
        Err(SessionError::Analysis(AnalysisError::MissingContext))
    ));
    assert_eq!(classifier.call_count(), 0);
    assert!(controller.shared().history.is_empty());
}

#[tokio::test]
async fn failure_leaves_other_state_alone() {
    let classifier = ScriptedClassifier::new();
    classifier.push_ok(verdict(RiskLevel::Scam));
    classifier.push_err("quota exceeded");

    let mut controller = signed_in();
    analyze_sms(&mut controller, &classifier, "Pay Rs 10 to unlock KYC").await;
    assert_eq!(controller.shared().ledger.points(), 5);

    controller.select_module(Feature::Link).unwrap();
    controller.analysis_mut().unwrap().set_text("http://kyc-update.xyz");
    controller.verify(&classifier).await.unwrap();

    let session = controller.analysis().unwrap();
    assert_eq!(session.state(), AnalysisState::Failed);
    assert_eq!(session.error(), Some(USER_FACING_MESSAGE));
    assert_eq!(controller.shared().ledger.points(), 5);
    assert_eq!(controller.shared().history.len(), 1);
}

#[tokio::test]
async fn switching_modules_starts_a_fresh_session() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Suspicious);
    let mut controller = signed_in();
    analyze_sms(&mut controller, &classifier, "Call me back regarding your parcel").await;

    controller.select_module(Feature::Sms).unwrap();
    assert_eq!(
        controller.analysis().unwrap().state(),
        AnalysisState::Resolved
    );

    controller.select_module(Feature::Screenshot).unwrap();
    let session = controller.analysis().unwrap();
    assert_eq!(session.feature(), Feature::Screenshot);
    assert_eq!(session.state(), AnalysisState::Idle);
    assert!(session.result().is_none());
}

// ============================================================
// Console command layer
// ============================================================

#[tokio::test]
async fn console_commands_drive_the_controller() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Scam);
    let mut controller = signed_in();

    for line in [
        "open sms",
        "text Your electricity will be cut tonight, pay now at bit.ly/eb",
        "verify",
        "report",
    ] {
        let command: Command = line.parse().unwrap();
        execute(&mut controller, command, &classifier).await.unwrap();
    }

    assert_eq!(controller.shared().ledger.points(), 15);
    assert_eq!(controller.shared().ledger.report_count(), 1);
}

#[tokio::test]
async fn auto_scan_verifies_links_as_they_are_entered() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Safe);
    let mut controller = signed_in();

    execute(&mut controller, Command::Toggle(SettingKey::AutoScan), &classifier)
        .await
        .unwrap();
    assert!(controller.shared().settings.auto_scan);

    execute(&mut controller, Command::Open(Feature::Link), &classifier)
        .await
        .unwrap();
    execute(
        &mut controller,
        Command::Text("https://flipkart.com".into()),
        &classifier,
    )
    .await
    .unwrap();

    assert_eq!(classifier.call_count(), 1);
    assert_eq!(
        controller.analysis().unwrap().state(),
        AnalysisState::Resolved
    );
}

#[tokio::test]
async fn console_rejects_phone_outside_phone_module() {
    let classifier = ScriptedClassifier::new();
    let mut controller = signed_in();
    execute(&mut controller, Command::Open(Feature::Sms), &classifier)
        .await
        .unwrap();
    let err = execute(&mut controller, Command::Phone("+91999".into()), &classifier)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Phone Check"));
}

#[tokio::test]
async fn console_accepts_pasted_data_url_images() {
    let classifier = ScriptedClassifier::replying(RiskLevel::Suspicious);
    let mut controller = signed_in();

    for line in [
        "open screenshot",
        "image data:image/png;base64,AQID",
        "context job offer from unknown number",
        "verify",
    ] {
        let command: Command = line.parse().unwrap();
        execute(&mut controller, command, &classifier).await.unwrap();
    }

    let requests = classifier.requests();
    let image = requests[0].image.as_ref().unwrap();
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data, vec![1, 2, 3]);
    assert_eq!(requests[0].text, "job offer from unknown number");
}

#[tokio::test]
async fn console_rejects_images_outside_image_modules() {
    let classifier = ScriptedClassifier::new();
    let mut controller = signed_in();
    execute(&mut controller, Command::Open(Feature::Link), &classifier)
        .await
        .unwrap();
    let err = execute(
        &mut controller,
        Command::ImageData("data:image/png;base64,AQID".into()),
        &classifier,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("screenshot and payment"));
    assert!(controller.analysis().unwrap().image().is_none());
}

#[test]
fn command_parsing() {
    assert_eq!("open payment".parse::<Command>().unwrap(), Command::Open(Feature::PaymentProof));
    assert_eq!("scan".parse::<Command>().unwrap(), Command::Verify);
    assert_eq!(
        "toggle comfort".parse::<Command>().unwrap(),
        Command::Toggle(SettingKey::ComfortMode)
    );
    assert_eq!(
        "url  https://sbi.co.in ".parse::<Command>().unwrap(),
        Command::Text("https://sbi.co.in".into())
    );
    assert_eq!(
        "image data:image/jpeg;base64,/9j/".parse::<Command>().unwrap(),
        Command::ImageData("data:image/jpeg;base64,/9j/".into())
    );
    assert_eq!(
        "image ./proof.png".parse::<Command>().unwrap(),
        Command::Image("./proof.png".into())
    );
    assert!("open".parse::<Command>().is_err());
    assert!("open wallet".parse::<Command>().is_err());
    assert!("dance".parse::<Command>().is_err());
}

#[test]
fn settings_defaults_and_toggle() {
    let mut controller = signed_in();
    let settings = &controller.shared().settings;
    assert!(settings.notifications);
    assert!(!settings.comfort_mode);
    assert!(!settings.auto_scan);
    assert!(settings.stronger_encryption);

    assert!(controller.toggle_setting(SettingKey::ComfortMode));
    assert!(!controller.toggle_setting(SettingKey::ComfortMode));
    assert!(!controller.toggle_setting(SettingKey::Notifications));
}
