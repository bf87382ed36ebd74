mod cli;
mod report;

use anyhow::Context;
use clap::Parser;
use marquee_config::{Config, ConfigLoad, ConfigLoader, ConfigWarnings};
use marquee_core::PollSession;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Args;
use report::OutcomeReporter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Override via RUST_LOG.
                "info,marquee_core=info,reqwest=warn,hyper_util=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ConfigLoad { config, warnings } = ConfigLoader::with_path(&args.config)
        .load()
        .with_context(|| {
            format!("failed to load configuration from {}", args.config.display())
        })?;
    log_warnings(&warnings);

    if args.check_config {
        print_summary(&config, &warnings);
        return Ok(());
    }

    let mut session =
        PollSession::from_config(&config).context("failed to build service clients")?;
    let mut reporter = OutcomeReporter::new();

    if args.once {
        let outcome = session.run_cycle().await;
        reporter.record(&outcome);
        return Ok(());
    }

    info!(
        user = %config.trakt.username,
        interval = ?config.polling.interval,
        output = %config.display.output_path.display(),
        rotation = config.display.rotation.degrees(),
        "watching for now-playing changes"
    );

    let mut ticker = interval_at(Instant::now(), config.polling.interval);
    // A slow cycle pushes the schedule back instead of bunching cycles up.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                tokio::select! {
                    _ = &mut shutdown => break,
                    outcome = session.run_cycle() => {
                        reporter.record(&outcome);
                    }
                }
            }
        }
    }

    info!("shutting down");
    Ok(())
}

fn log_warnings(warnings: &ConfigWarnings) {
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }
}

fn print_summary(config: &Config, warnings: &ConfigWarnings) {
    println!("configuration OK");
    println!("  trakt user:      {}", config.trakt.username);
    println!("  trakt api:       {}", config.trakt.base_url);
    println!("  tmdb api:        {}", config.tmdb.base_url);
    println!(
        "  poster images:   {}/{}",
        config.tmdb.image_base_url.as_str().trim_end_matches('/'),
        config.tmdb.poster_size
    );
    println!("  poll interval:   {:?}", config.polling.interval);
    println!("  request timeout: {:?}", config.polling.request_timeout);
    println!("  output path:     {}", config.display.output_path.display());
    println!("  rotation:        {}°", config.display.rotation.degrees());
    println!("  viewer:          {}", config.display.viewer_command.join(" "));
    if !warnings.is_empty() {
        println!("  warnings:        {}", warnings.len());
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
