//! CLI entry point for the harness

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wiki_e2e::{Harness, HarnessConfig, Session, SCENARIO_NAMES};

#[derive(Parser, Debug)]
#[command(name = "wiki-e2e", about = "End-to-end browser tests for a Wikipedia instance")]
struct Cli {
    /// Base URL of the target Wikipedia instance
    #[arg(long)]
    base_url: Option<String>,

    /// WebDriver endpoint (e.g. a running chromedriver)
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Run only the named scenarios (repeatable); defaults to the full suite
    #[arg(long = "scenario")]
    scenarios: Vec<String>,

    /// List available scenarios and exit
    #[arg(long)]
    list: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) -> Result<()> {
    let level: tracing::Level = level.parse().context("Invalid log level")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    if cli.list {
        for name in SCENARIO_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = HarnessConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(webdriver_url) = cli.webdriver_url {
        config.webdriver_url = webdriver_url;
    }
    if cli.headed {
        config.headless = false;
    }

    info!(base_url = %config.base_url, "starting test run");
    let session = Session::start(&config).await?;
    let harness = Harness::new(session.browser(), config);

    // Run everything before teardown so the session is released exactly once
    // on every exit path.
    let mut passed = 0usize;
    let mut failures: Vec<(String, String)> = Vec::new();
    if cli.scenarios.is_empty() {
        let summary = harness.run_all().await;
        passed = summary.passed.len();
        failures = summary
            .failed
            .into_iter()
            .map(|(name, err)| (name, err.to_string()))
            .collect();
    } else {
        for name in &cli.scenarios {
            match harness.run_scenario(name).await {
                Ok(()) => passed += 1,
                Err(err) => failures.push((name.clone(), err.to_string())),
            }
        }
    }

    session.close().await?;

    println!("passed: {passed}, failed: {}", failures.len());
    for (name, err) in &failures {
        println!("  {name}: {err}");
    }

    if failures.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} scenario(s) failed", failures.len())
    }
}
