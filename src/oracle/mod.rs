// Classification oracle: trait-based abstraction over the hosted model.
//
// The RiskClassifier trait defines the interface. GeminiClassifier implements
// it against Google's generateContent API. The session state machines only
// ever see the trait, so tests drive them with scripted classifiers.

pub mod error;
pub mod gemini;
pub mod image;
pub mod prompt;
pub mod response;
pub mod traits;

pub use error::OracleError;
pub use image::ImageAttachment;
pub use traits::{ClassifyRequest, RiskClassifier};
