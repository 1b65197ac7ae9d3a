use anyhow::Context;
use clap::Parser;
use milan::{Matchmaker, SignResolver, SwissEphemeris};
use milan_config::Settings;
use milan_server::{router, AppState};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Name, rashi and lagna compatibility API")]
struct Args {
    /// Config file (default: configs/milan.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind host; overrides config and HOST.
    #[arg(long)]
    host: Option<String>,

    /// Bind port; overrides config and PORT.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply_cli(args.host, args.port);

    let rules = settings.rule_book()?;
    for name in rules.names() {
        if let Some(table) = rules.table(name) {
            for flagged in table.flagged_labels() {
                log::warn!("table '{}' uses label '{}' for {}", name, flagged.label, flagged.resolved);
            }
        }
    }

    let oracle = SwissEphemeris::new(&settings.ephemeris).with_context(|| {
        format!(
            "Failed to initialise Swiss Ephemeris at {}",
            settings.ephemeris.ephemeris_path.display()
        )
    })?;
    let resolver = SignResolver::from_oracle(oracle, settings.ephemeris.clone());
    let state = Arc::new(AppState::new(Matchmaker::new(resolver, rules), &settings));

    let addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!(
        "milan_server listening on {} ({}), ephemeris at {}, houses={}, tables moon={} ascendant={}",
        addr,
        settings.environment.label(),
        settings.ephemeris.ephemeris_path.display(),
        settings.ephemeris.house_system,
        settings.compatibility.moon_table,
        settings.compatibility.ascendant_table
    );

    axum::serve(listener, router(state))
        .await
        .context("HTTP server terminated")?;
    Ok(())
}
