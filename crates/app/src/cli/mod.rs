use clap::{Parser, Subcommand};

mod config;
mod db;
mod token;

#[derive(Debug, Parser)]
#[command(name = "backstage-app", about = "Backstage CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Config(config::ConfigCommand),
    Db(db::DbCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Config(command) => config::run(command).await,
            Commands::Db(command) => db::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}
