pub mod inference;
pub mod prompt;
pub mod reconciler;
pub mod recommendations;
pub mod registration;
pub mod response_parser;

pub use inference::{GeminiClient, InferenceClient};
