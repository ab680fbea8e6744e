// src/prober.rs
use crate::config::{ProbeConfig, TrialConfig};
use crate::errors::ProbeError;
use crate::providers::{gemini::GeminiProvider, ProbeTarget};
use serde::Serialize;
use std::time::Instant;

/// Error messages are cut to this many characters on the console.
pub const MAX_ERROR_DISPLAY: usize = 100;

/// How one trial ended.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub enum Outcome {
    /// Success status and extractable reply text.
    Success { text: String },
    /// Non-success status or a transport fault.
    Failure { message: String },
    /// Success status but no extractable candidate text. Nothing is printed
    /// for this branch; the loop just moves on.
    Inconclusive,
}

/// Record of a single trial.
#[derive(Debug, Serialize, Clone)]
pub struct TrialOutcome {
    pub trial: TrialConfig,
    /// HTTP status, when one was captured for the trial.
    pub status: Option<u16>,
    pub outcome: Outcome,
    pub latency_ms: Option<u64>,
}

/// Full record of a probe run.
#[derive(Debug, Serialize, Clone)]
pub struct ProbeReport {
    /// First trial that produced a reply, if any.
    pub winner: Option<TrialConfig>,
    pub outcomes: Vec<TrialOutcome>,
    pub timestamp: String,
    pub total_latency_ms: u64,
}

/// Cuts `message` to `limit` characters for display. Lossy, but safe on
/// multi-byte input.
fn truncate_for_display(message: &str, limit: usize) -> String {
    if message.chars().count() <= limit {
        message.to_string()
    } else {
        message.chars().take(limit).collect()
    }
}

/// Run every configured trial in order until one succeeds.
///
/// Trials are strictly sequential: first success wins and ends the run.
/// A failed trial never aborts the ones after it.
pub async fn run_probe(config: &ProbeConfig, client: &reqwest::Client) -> ProbeReport {
    let run_start = Instant::now();
    let provider = GeminiProvider::new(client.clone(), config.gemini.clone());
    let separator = "=".repeat(60);

    let mut winner = None;
    let mut outcomes = Vec::with_capacity(config.trials.len());

    for trial in &config.trials {
        println!("\n{}", separator);
        println!("Testing: {}", trial);
        println!("{}", separator);

        match provider
            .generate(&trial.api_version, &trial.model, &config.prompt)
            .await
        {
            Ok(generation) => {
                println!("✅ Success! This configuration works.");
                println!("\n📝 AI Response:");
                println!("{}", generation.text);
                println!("\n✅ Use: API={}, Model={}", trial.api_version, trial.model);

                outcomes.push(TrialOutcome {
                    trial: trial.clone(),
                    status: Some(generation.status),
                    outcome: Outcome::Success {
                        text: generation.text,
                    },
                    latency_ms: Some(generation.latency_ms),
                });
                winner = Some(trial.clone());
                break;
            }
            Err(ProbeError::Api { status, message }) => {
                println!(
                    "❌ Failed: {}...",
                    truncate_for_display(&message, MAX_ERROR_DISPLAY)
                );
                outcomes.push(TrialOutcome {
                    trial: trial.clone(),
                    status: Some(status),
                    outcome: Outcome::Failure { message },
                    latency_ms: None,
                });
            }
            Err(ProbeError::UnexpectedResponse(body)) => {
                // Success status without candidate text: neither a success
                // nor a failure line, matching the original fall-through.
                log::debug!("Trial {} returned no candidate text: {}", trial, body);
                outcomes.push(TrialOutcome {
                    trial: trial.clone(),
                    status: None,
                    outcome: Outcome::Inconclusive,
                    latency_ms: None,
                });
            }
            Err(e) => {
                println!("❌ Exception: {}", e);
                outcomes.push(TrialOutcome {
                    trial: trial.clone(),
                    status: None,
                    outcome: Outcome::Failure {
                        message: e.to_string(),
                    },
                    latency_ms: None,
                });
            }
        }
    }

    if winner.is_none() {
        println!("\n❌ None of the configurations worked!");
    }

    ProbeReport {
        winner,
        outcomes,
        timestamp: chrono::Utc::now().to_rfc3339(),
        total_latency_ms: run_start.elapsed().as_millis() as u64,
    }
}
