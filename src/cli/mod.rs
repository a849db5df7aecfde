use std::path::PathBuf;

use clap::Parser;

use crate::domain::FeedFormat;

#[derive(Parser, Debug)]
#[command(name = "eddy")]
#[command(about = "A terminal dashboard for ranked news stories", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/eddy/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the feed format from the config file
    #[arg(short, long, value_enum)]
    pub format: Option<FeedFormat>,
}
