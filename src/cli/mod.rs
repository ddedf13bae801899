use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod health;
pub mod summarize;

use crate::api::ApiClient;
use crate::chat::UnansweredTurnPolicy;
use crate::core::{AppConfig, logging};

#[derive(Subcommand)]
enum Command {
    /// Summarize a .pdf or .docx document
    Summarize {
        file: PathBuf,
    },
    /// Chat about a document
    Chat {
        /// Document to open right away
        file: Option<PathBuf>,
    },
    /// Check that the document service is reachable
    Health {
        #[arg(default_value = "docassist")]
        name: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the document service
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// What to do with a message whose send failed
    #[arg(long, value_enum, global = true)]
    unanswered_turns: Option<UnansweredTurnPolicy>,

    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    logging::init();

    let config = AppConfig::default().with_overrides(args.api_url, args.unanswered_turns);
    let client = ApiClient::new(&config.api_base_url);

    // Handle each sub command
    match args.command {
        Some(Command::Summarize { file }) => {
            summarize::run(&client, &file).await?;
        }
        Some(Command::Chat { file }) => {
            chat::run(client, config.unanswered_turns, file).await?;
        }
        Some(Command::Health { name }) => {
            health::run(&client, &name).await?;
        }
        None => {}
    }

    Ok(())
}
