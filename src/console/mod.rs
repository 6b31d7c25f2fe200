// Interactive console: the terminal rendition of the scam guard UI.
//
// Walks the navigation state machine: the splash screen auto-advances to
// the login prompt, any non-empty email/password pair opens the dashboard,
// and from there everything is a line command (see `command::HELP`).
//
// The loop awaits each oracle call before reading the next line, so a
// module can only have one call in flight at a time.

pub mod command;

use std::io::Write as _;

use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use crate::config::Config;
use crate::models::Feature;
use crate::oracle::{ImageAttachment, RiskClassifier};
use crate::output::terminal;
use crate::session::navigation::IntroTimer;
use crate::session::{DashboardView, Screen, SessionController};

pub use command::Command;

type InputLines = Lines<BufReader<Stdin>>;

/// Run the console until the user quits or stdin closes.
pub async fn run(config: &Config, classifier: &dyn RiskClassifier) -> Result<()> {
    let mut controller = SessionController::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    terminal::display_splash();
    {
        // Dropping the timer on an early Ctrl-C cancels the transition.
        let (_timer, mut elapsed) = IntroTimer::start(config.intro_delay);
        tokio::select! {
            Some(_) = elapsed.recv() => {
                controller.intro_elapsed();
            }
            _ = tokio::signal::ctrl_c() => {
                return Ok(());
            }
        }
    }

    loop {
        match controller.screen() {
            Screen::Intro => {
                controller.intro_elapsed();
            }
            Screen::Login => {
                terminal::display_login_prompt();
                let Some(email) = prompt(&mut lines, "Email: ").await? else {
                    break;
                };
                let Some(password) = prompt(&mut lines, "Password: ").await? else {
                    break;
                };
                match controller.login(&email, &password) {
                    Ok(()) => show_view(&controller),
                    Err(e) => terminal::display_error(&e.to_string()),
                }
            }
            Screen::Dashboard => {
                let Some(line) = prompt(&mut lines, "suraksha> ").await? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        terminal::display_error(&e.to_string());
                        continue;
                    }
                };
                if command == Command::Quit {
                    break;
                }
                if let Err(e) = execute(&mut controller, command, classifier).await {
                    terminal::display_error(&e.to_string());
                }
            }
        }
    }

    info!("Console closed");
    Ok(())
}

/// Apply one dashboard command to the controller and render the result.
pub async fn execute(
    controller: &mut SessionController,
    command: Command,
    classifier: &dyn RiskClassifier,
) -> Result<()> {
    match command {
        Command::Help => println!("{}", command::HELP),
        Command::Home => {
            controller.go_home()?;
            show_view(controller);
        }
        Command::Open(feature) => {
            controller.select_module(feature)?;
            show_view(controller);
        }
        Command::Settings => {
            controller.open_settings()?;
            show_view(controller);
        }
        Command::Toggle(key) => {
            let on = controller.toggle_setting(key);
            println!(
                "  {} is now {}",
                key.label(),
                if on { "on".green() } else { "off".dimmed() }
            );
        }
        Command::Text(text) => {
            let session = controller.analysis_mut()?;
            session.set_text(text);
            let auto_scan = session.feature() == Feature::Link && session.can_submit();
            if auto_scan && controller.shared().settings.auto_scan {
                return verify(controller, classifier).await;
            }
            show_view(controller);
        }
        Command::Phone(phone) => {
            let session = controller.analysis_mut()?;
            if session.feature() != Feature::Phone {
                anyhow::bail!("Phone numbers only apply to the Phone Check module.");
            }
            session.set_phone(phone);
            show_view(controller);
        }
        Command::Image(path) => {
            attach_image(controller, ImageAttachment::from_path(&path)?)?;
            show_view(controller);
        }
        Command::ImageData(url) => {
            attach_image(controller, ImageAttachment::from_data_url(&url)?)?;
            show_view(controller);
        }
        Command::Verify => return verify(controller, classifier).await,
        Command::Report => {
            if controller.report()? {
                println!("  {} Threat reported. +10 points", "⚑".red());
            } else {
                println!("  Threat reported. This input was already credited.");
            }
            terminal::display_rewards(&controller.shared().ledger);
        }
        Command::Clear => {
            controller.analysis_mut()?.reset();
            show_view(controller);
        }
        Command::History => terminal::display_history(&controller.shared().history),
        Command::Points => terminal::display_rewards(&controller.shared().ledger),
        Command::Logout => {
            controller.logout()?;
            println!("  Signed out.");
        }
        Command::Quit => {}
    }
    Ok(())
}

async fn verify(controller: &mut SessionController, classifier: &dyn RiskClassifier) -> Result<()> {
    let points_before = controller.shared().ledger.points();

    let spinner = terminal::spinner("Processing intelligence...");
    let outcome = controller.verify(classifier).await;
    spinner.finish_and_clear();
    outcome?;

    show_view(controller);

    let shared = controller.shared();
    let scam = controller
        .analysis()
        .and_then(|s| s.result())
        .is_some_and(|r| r.is_scam());
    if scam {
        if shared.settings.notifications {
            if let Some(session) = controller.analysis() {
                terminal::display_alert(session.feature());
            }
        }
        if shared.ledger.points() > points_before {
            println!("  {} Scam detected. +5 points", "★".yellow());
        }
    }
    Ok(())
}

fn attach_image(controller: &mut SessionController, image: ImageAttachment) -> Result<()> {
    let session = controller.analysis_mut()?;
    if !session.feature().requires_image() {
        anyhow::bail!("Images only apply to the screenshot and payment modules.");
    }
    session.set_image(image);
    Ok(())
}

/// Render whatever the dashboard currently shows.
fn show_view(controller: &SessionController) {
    let shared = controller.shared();
    let comfort = shared.settings.comfort_mode;
    match controller.navigator().view() {
        DashboardView::Home => {
            let user = controller.navigator().user().unwrap_or_default();
            terminal::display_home(user, &shared.ledger, comfort);
        }
        DashboardView::Module(_) => {
            if let Some(session) = controller.analysis() {
                terminal::display_module(session, comfort);
            }
        }
        DashboardView::Settings => terminal::display_settings(&shared.settings),
    }
}

async fn prompt(lines: &mut InputLines, label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}
