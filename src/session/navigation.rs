// Top-level screen flow: splash -> login -> dashboard, plus the view
// selection inside the dashboard.
//
// Sign-in is not verified: any non-empty email/password pair is accepted
// and the email becomes the identity shown on the dashboard.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::error::NavigationError;
use crate::models::Feature;

/// How long the splash screen stays up.
pub const INTRO_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Login,
    Dashboard,
}

/// What the dashboard's main panel shows. One enum so the module and
/// settings views can never be open together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Home,
    Module(Feature),
    Settings,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    screen: Screen,
    user: Option<String>,
    view: DashboardView,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start on the splash screen.
    pub fn new() -> Self {
        Self {
            screen: Screen::Intro,
            user: None,
            view: DashboardView::Home,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn view(&self) -> DashboardView {
        self.view
    }

    pub fn selected_module(&self) -> Option<Feature> {
        match self.view {
            DashboardView::Module(feature) => Some(feature),
            _ => None,
        }
    }

    pub fn settings_open(&self) -> bool {
        self.view == DashboardView::Settings
    }

    /// The splash delay has passed. Only moves Intro -> Login; returns
    /// whether a transition happened.
    pub fn intro_elapsed(&mut self) -> bool {
        if self.screen != Screen::Intro {
            return false;
        }
        self.screen = Screen::Login;
        true
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<(), NavigationError> {
        if self.screen != Screen::Login {
            return Err(NavigationError::NotOnLogin);
        }
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(NavigationError::MissingCredentials);
        }

        self.user = Some(email.trim().to_string());
        self.view = DashboardView::Home;
        self.screen = Screen::Dashboard;
        info!(user = %email.trim(), "Signed in");
        Ok(())
    }

    /// Back to the login screen. Only the identity is cleared.
    pub fn logout(&mut self) -> Result<(), NavigationError> {
        self.require_dashboard()?;
        self.user = None;
        self.view = DashboardView::Home;
        self.screen = Screen::Login;
        info!("Signed out");
        Ok(())
    }

    pub fn select_module(&mut self, feature: Feature) -> Result<(), NavigationError> {
        self.require_dashboard()?;
        self.view = DashboardView::Module(feature);
        Ok(())
    }

    pub fn open_settings(&mut self) -> Result<(), NavigationError> {
        self.require_dashboard()?;
        self.view = DashboardView::Settings;
        Ok(())
    }

    pub fn go_home(&mut self) -> Result<(), NavigationError> {
        self.require_dashboard()?;
        self.view = DashboardView::Home;
        Ok(())
    }

    fn require_dashboard(&self) -> Result<(), NavigationError> {
        if self.screen == Screen::Dashboard {
            Ok(())
        } else {
            Err(NavigationError::NotOnDashboard)
        }
    }
}

/// Fired by the splash timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroElapsed;

/// Splash screen timer. Dropping it cancels the pending transition.
pub struct IntroTimer {
    handle: JoinHandle<()>,
}

impl IntroTimer {
    /// Start the timer. `IntroElapsed` is sent on the returned channel once
    /// `delay` has passed, unless the timer is dropped first.
    pub fn start(delay: Duration) -> (Self, mpsc::Receiver<IntroElapsed>) {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(IntroElapsed).await;
        });
        (Self { handle }, rx)
    }
}

impl Drop for IntroTimer {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!("Intro timer cancelled");
        }
        self.handle.abort();
    }
}
