use clap::{Args, Subcommand};

mod create;
mod list;
mod revoke;
mod rotate;

#[derive(Debug, Args)]
pub(crate) struct OperatorCommand {
    #[command(subcommand)]
    command: OperatorSubcommand,
}

#[derive(Debug, Subcommand)]
enum OperatorSubcommand {
    Create(create::CreateOperatorArgs),
    List(list::ListOperatorsArgs),
    Revoke(revoke::RevokeOperatorArgs),
    RotateToken(rotate::RotateTokenArgs),
}

pub(crate) async fn run(command: OperatorCommand) -> Result<(), String> {
    match command.command {
        OperatorSubcommand::Create(args) => create::run(args).await,
        OperatorSubcommand::List(args) => list::run(args).await,
        OperatorSubcommand::Revoke(args) => revoke::run(args).await,
        OperatorSubcommand::RotateToken(args) => rotate::run(args).await,
    }
}
