use clap::Args;
use till_app::{
    database::{self, Db},
    operators::{OperatorsService, PgOperatorsService},
};

#[derive(Debug, Args)]
pub(crate) struct ListOperatorsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListOperatorsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let operators = PgOperatorsService::new(Db::new(pool))
        .list_operators()
        .await
        .map_err(|error| format!("failed to list operators: {error}"))?;

    if operators.is_empty() {
        println!("no operators found");
        return Ok(());
    }

    for operator in operators {
        println!("operator_uuid: {}", operator.uuid);
        println!("username: {}", operator.username);
        println!("role: {}", operator.role);
        println!("created_at: {}", operator.created_at);
        println!(
            "revoked_at: {}",
            operator
                .revoked_at
                .map_or_else(|| "active".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}
