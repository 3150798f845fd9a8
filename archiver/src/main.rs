#![warn(
    clippy::cognitive_complexity,
    clippy::missing_const_for_fn,
    clippy::option_if_let_else
)]

mod archive;
mod catalog;
mod config;
mod errors;
mod extract;
mod files;
mod pager;
mod remote;
mod retry;
mod throttle;

use clap::{Parser, ValueEnum};
use db::WriteableConn;
use log::LevelFilter;
use log::{error, info};
use simple_logger::SimpleLogger;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use config::Config;
use errors::Result;
use remote::Client;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Archive channels and messages
    Data,
    /// Archive avatars and uploads referenced by already archived messages
    Files,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(value_enum)]
    mode: Mode,
    /// Host of the messaging service, e.g. chat.example.com
    host: String,
    /// Account email used for basic auth
    email: String,
    /// API key of the account
    #[arg(env = "API_KEY", hide_env_values = true)]
    api_key: String,
    /// Path of the archive database
    #[arg(long, default_value = "./archive.db3")]
    db: PathBuf,
    /// Delay between two message pages
    #[arg(long, value_parser = humantime::parse_duration, default_value = "1s")]
    page_delay: Duration,
    /// Delay after each downloaded file
    #[arg(long, value_parser = humantime::parse_duration, default_value = "200ms")]
    file_delay: Duration,
    /// Timeout of a single request
    #[arg(long, value_parser = humantime::parse_duration, default_value = "1m")]
    timeout: Duration,
    /// Retries for listing channels, topics and messages
    #[arg(long, default_value_t = 3)]
    retries: u32,
}

impl Args {
    fn config(&self) -> Result<Config> {
        let mut config = Config::new(&self.host, &self.email, &self.api_key)?;
        config.page_delay = self.page_delay;
        config.file_delay = self.file_delay;
        config.timeout = self.timeout;
        config.retry.max_retries = self.retries;
        Ok(config)
    }
}

async fn run(args: Args) -> Result<()> {
    // configuration problems surface before any file or network access
    let config = args.config()?;
    let db = WriteableConn::open(&args.db)?;
    info!("sucessfully loaded and migrated db {}", args.db.display());
    let client = Client::new(config.clone())?;

    match args.mode {
        Mode::Data => {
            let summary = archive::archive_data(&db, &client, &config).await?;
            info!(
                "archived {} channels, {} topics, {} pages: {} new messages, {} already stored",
                summary.channels,
                summary.topics,
                summary.pages,
                summary.messages_stored,
                summary.messages_existing
            );
        }
        Mode::Files => {
            let summary = files::archive_files(&db, &client, &config).await?;
            info!(
                "archived files: {} stored, {} skipped, {} failed",
                summary.stored, summary.skipped, summary.failed
            );
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .with_module_level("archiver", LevelFilter::Debug)
        .with_module_level("db", LevelFilter::Debug)
        .with_utc_timestamps()
        .init()
        .expect("logger is initialised once");

    let args = Args::parse();
    let mode = args.mode;
    if let Err(why) = run(args).await {
        error!("{mode:?} archive failed: {why}");
        process::exit(-1);
    }
}
