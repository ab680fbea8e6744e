// src/providers/mod.rs

use crate::errors::Result;

pub mod gemini;

/// The result of one successful generation call.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Text extracted from the first candidate.
    pub text: String,
    /// HTTP status of the response.
    pub status: u16,
    /// Wall-clock time of the call in milliseconds.
    pub latency_ms: u64,
}

/// A generation endpoint a probe can be run against.
///
/// Note: We're not using async_trait here, so implementers must handle async directly.
pub trait ProbeTarget: Send + Sync {
    /// Sends `prompt` to `model` under the given API surface version and
    /// returns the extracted reply.
    ///
    /// # Arguments
    /// * `api_version` - The REST API surface to hit (e.g., "v1beta", "v1").
    /// * `model` - The model name (e.g., "gemini-2.0-flash-exp").
    /// * `prompt` - The input prompt to send to the model.
    fn generate(
        &self,
        api_version: &str,
        model: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<Generation>> + Send;
}
