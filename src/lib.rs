// Suraksha: AI scam guard
//
// This is the library root. Each module corresponds to a major subsystem
// of the scam guard: the classification oracle, the session state that
// surrounds it, and the terminal front end.

pub mod config;
pub mod console;
pub mod models;
pub mod oracle;
pub mod output;
pub mod session;
