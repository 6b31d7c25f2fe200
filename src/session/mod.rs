// Client-side state surrounding the oracle: navigation, per-module analysis
// sessions, and the process-wide ledger, history and settings.
//
// Everything here is single-threaded and synchronous apart from the oracle
// call inside `AnalysisSession::submit`.

pub mod analysis;
pub mod controller;
pub mod error;
pub mod history;
pub mod ledger;
pub mod navigation;
pub mod settings;

pub use analysis::{AnalysisSession, AnalysisState, PendingAnalysis};
pub use controller::{SessionController, SharedState};
pub use error::{AnalysisError, NavigationError, SessionError};
pub use history::HistoryLog;
pub use ledger::RewardLedger;
pub use navigation::{DashboardView, Navigator, Screen};
pub use settings::{SettingKey, Settings};
