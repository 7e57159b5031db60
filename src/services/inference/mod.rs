//! Generative-text inference abstraction
//!
//! The recommendation pipeline only needs "prompt in, text out". Keeping that
//! behind a trait lets the HTTP provider be swapped or mocked.

use crate::error::AppResult;

pub mod gemini;

pub use gemini::GeminiClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends the prompt and returns the model's raw text output
    ///
    /// Transport failures and non-success statuses are reported as
    /// [`crate::error::AppError::Inference`].
    async fn infer(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
