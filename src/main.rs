use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use flowscore::cli::{Cli, Command, load_rows};
use flowscore::config::FlowscoreConfig;
use flowscore::queue::ScoreQueue;
use flowscore::record::JsonRowExtractor;
use flowscore::transport::{Channel, HttpChannel, Transport};
use flowscore::ui::ConsolePresenter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.verbose {
                    "flowscore=debug"
                } else {
                    "flowscore=info"
                })
            }),
        )
        .init();

    let mut config = FlowscoreConfig::load()?;
    if let Some(url) = cli.url {
        config.score_url = url;
    }

    match cli.command {
        Command::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
        Command::Run {
            file,
            max_concurrent,
        } => {
            let rows = load_rows(Path::new(&file))?;
            let transport = Transport::new(vec![Channel::Http(HttpChannel::with_timeout(
                config.score_url.clone(),
                config.request_timeout(),
            ))]);
            let queue = ScoreQueue::new(
                JsonRowExtractor,
                transport,
                Arc::new(ConsolePresenter::new()),
                config.retry_policy(),
                max_concurrent.unwrap_or(config.max_concurrent),
            );

            info!(rows = rows.len(), url = %config.score_url, "scoring rows");
            for row in &rows {
                queue.admit(row);
            }
            queue.drain().await;
        }
    }

    Ok(())
}
