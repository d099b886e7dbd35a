//! Terminal front-end: survey runner and counseling REPL.

mod chat;
mod survey;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "haven", about = "Attachment-profile counseling chatbot", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the 19-item survey and print the resulting profile
    Survey,

    /// Run the survey, then start a counseling session
    Chat {
        /// Persona nickname to request (falls back to axis matching)
        #[arg(long)]
        nickname: Option<String>,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Survey => {
            survey::run()?;
            Ok(())
        }
        Command::Chat { nickname } => {
            let config = Config::from_env()?;
            chat::run(&config, nickname.as_deref()).await
        }
    }
}
