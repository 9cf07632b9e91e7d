use clap::Args;
use till_app::{
    database::{self, Db},
    operators::{OperatorsService, PgOperatorsService},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RotateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Operator UUID whose token should be replaced
    #[arg(long)]
    operator_uuid: Uuid,
}

pub(crate) async fn run(args: RotateTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let issued = PgOperatorsService::new(Db::new(pool))
        .rotate_token(args.operator_uuid.into())
        .await
        .map_err(|error| format!("failed to rotate token: {error}"))?;

    println!("operator_uuid: {}", issued.operator.uuid);
    println!("username: {}", issued.operator.username);
    println!("api_token: {}", issued.token);
    println!("the previous token no longer works; store this one now");

    Ok(())
}
