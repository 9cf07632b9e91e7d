use clap::{Parser, Subcommand};

mod db;
mod operator;

#[derive(Debug, Parser)]
#[command(name = "till-app", about = "Till CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Operator(operator::OperatorCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Operator(command) => operator::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
