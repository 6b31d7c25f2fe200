use thiserror::Error;

/// Local validation failures. No oracle call is made when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Please enter the text to analyze.")]
    MissingText,

    #[error("Please enter the sender's phone number.")]
    MissingPhone,

    #[error("Please describe what they asked for.")]
    MissingContext,

    #[error("Please upload the required screenshot to proceed.")]
    MissingImage,

    #[error("An analysis is already in progress.")]
    InFlight,

    #[error("Only a Scam verdict can be reported.")]
    NothingToReport,

    #[error("This threat has already been reported.")]
    AlreadyReported,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Enter both an email and a password to sign in.")]
    MissingCredentials,

    #[error("Sign-in is only available from the login screen.")]
    NotOnLogin,

    #[error("Sign in to use the dashboard.")]
    NotOnDashboard,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("Open a module first.")]
    NoModuleOpen,
}
