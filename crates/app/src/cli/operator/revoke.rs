use clap::Args;
use till_app::{
    database::{self, Db},
    operators::{OperatorsService, OperatorsServiceError, PgOperatorsService},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeOperatorArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Operator UUID to revoke
    #[arg(long)]
    operator_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeOperatorArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let result = PgOperatorsService::new(Db::new(pool))
        .revoke_operator(args.operator_uuid.into())
        .await;

    match result {
        Ok(operator) => println!("revoked operator {} ({})", operator.uuid, operator.username),
        Err(OperatorsServiceError::NotFound) => {
            println!("operator {} was not active", args.operator_uuid);
        }
        Err(error) => return Err(format!("failed to revoke operator: {error}")),
    }

    Ok(())
}
