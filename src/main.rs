use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use suraksha::config::Config;
use suraksha::models::Feature;
use suraksha::oracle::gemini::GeminiClassifier;
use suraksha::oracle::ImageAttachment;
use suraksha::output::terminal;
use suraksha::session::{AnalysisSession, SharedState};

/// Suraksha: AI scam guard.
///
/// Checks SMS messages, links, phone calls, screenshots and UPI payment
/// proofs for signs of fraud. Run without a subcommand for the interactive
/// dashboard.
#[derive(Parser)]
#[command(name = "suraksha", version, about)]
struct Cli {
    /// Print the verdict as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive dashboard (the default)
    Console,

    /// Analyze an SMS or chat message
    Sms {
        /// The message text
        text: String,
    },

    /// Verify a link
    Link {
        /// The URL to check
        url: String,
    },

    /// Check a phone number together with what the caller asked for
    Phone {
        /// Sender phone number (e.g. +911234567890)
        #[arg(long)]
        number: String,

        /// What they asked for
        #[arg(long)]
        context: String,
    },

    /// Scan a screenshot for scam signals
    Screenshot {
        /// Path to the screenshot (png, jpg, webp)
        #[arg(long)]
        image: PathBuf,

        /// Extra context for the analysis
        #[arg(long, default_value = "")]
        context: String,
    },

    /// Validate a UPI / GPay / PhonePe / Paytm payment proof
    Payment {
        /// Path to the payment screenshot
        #[arg(long)]
        image: PathBuf,

        /// Notes for the analysis
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging on stderr so it never interleaves with console output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("suraksha=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    config.require_oracle()?;

    let classifier =
        GeminiClassifier::new(&config.api_url, config.api_key.clone(), config.model.clone())
            .context("Failed to build the oracle client")?;
    info!(model = %config.model, "Using Gemini classifier");

    let mut session = match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => {
            return suraksha::console::run(&config, &classifier).await;
        }
        Commands::Sms { text } => {
            let mut session = AnalysisSession::new(Feature::Sms);
            session.set_text(text);
            session
        }
        Commands::Link { url } => {
            let mut session = AnalysisSession::new(Feature::Link);
            session.set_text(url);
            session
        }
        Commands::Phone { number, context } => {
            let mut session = AnalysisSession::new(Feature::Phone);
            session.set_phone(number);
            session.set_text(context);
            session
        }
        Commands::Screenshot { image, context } => {
            let mut session = AnalysisSession::new(Feature::Screenshot);
            session.set_image(ImageAttachment::from_path(&image)?);
            session.set_text(context);
            session
        }
        Commands::Payment { image, notes } => {
            let mut session = AnalysisSession::new(Feature::PaymentProof);
            session.set_image(ImageAttachment::from_path(&image)?);
            session.set_text(notes);
            session
        }
    };

    let mut shared = SharedState::new();

    let spinner = (!cli.json).then(|| terminal::spinner("Processing intelligence..."));
    let submitted = session.submit(&classifier, &mut shared).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    submitted?;

    if let Some(message) = session.error() {
        if cli.json {
            println!("{}", serde_json::json!({ "error": message }));
        } else {
            terminal::display_error(message);
        }
        std::process::exit(1);
    }

    let Some(result) = session.result() else {
        anyhow::bail!("Analysis finished without a result");
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        terminal::display_result(session.feature(), result);
        if result.is_scam() {
            println!(
                "\n  {}",
                "Run `suraksha` for the dashboard to report this threat.".dimmed()
            );
        }
    }

    Ok(())
}
