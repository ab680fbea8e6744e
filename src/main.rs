mod banner;
mod config;
mod errors;
mod prober;
mod providers;

use std::path::Path;

#[tokio::main]
async fn main() {
    // Print the startup banner
    banner::print_banner();

    // Load .env file - the key may also come from the environment directly
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
        eprintln!("   Make sure GEMINI_API_KEY is set in your environment");
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let mut probe_config = match config::ProbeConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // Optional probe file as the first argument, overriding prompt/trials.
    if let Some(path) = std::env::args().nth(1) {
        if let Err(e) = probe_config.apply_file(Path::new(&path)) {
            eprintln!("❌ Could not load probe file {}: {}", path, e);
            std::process::exit(1);
        }
        log::info!("Loaded probe file: {}", path);
    }

    let client = reqwest::Client::new();
    let report = prober::run_probe(&probe_config, &client).await;

    if let Some(winner) = &report.winner {
        log::info!(
            "Probe finished in {}ms, winner: {}",
            report.total_latency_ms,
            winner
        );
    } else {
        log::info!(
            "Probe finished in {}ms, no working configuration",
            report.total_latency_ms
        );
    }
}
