use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use eddy::app::{log_file, AppContext};
use eddy::cli::Cli;
use eddy::config::Config;
use eddy::domain::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(format) = cli.format {
        config.feed.format = format;
    }

    let ctx = AppContext::new(&config)?;

    // Built before the terminal is taken over so a failure prints normally.
    let initial = match ctx.initial_posts(Filter::Front).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    eddy::tui::run(Arc::new(ctx), Arc::new(config), initial).await?;

    Ok(())
}

/// The terminal belongs to the dashboard, so logs go to
/// `<cache dir>/eddy/eddy.log`, falling back to `./eddy.log`.
/// `RUST_LOG` overrides the default level.
fn init_tracing() {
    let file_layer = log_file::open_log_file(&log_file::log_dirs()).map(|(_, file)| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
