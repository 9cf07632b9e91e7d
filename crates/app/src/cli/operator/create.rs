use clap::Args;
use till_app::{
    database::{self, Db},
    operators::{
        OperatorsService, PgOperatorsService,
        models::{NewOperator, OperatorRole},
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateOperatorArgs {
    /// Login name, unique across operators
    #[arg(long)]
    username: String,

    /// Operator role (`admin` or `cashier`)
    #[arg(long, default_value = "cashier")]
    role: OperatorRole,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateOperatorArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let issued = PgOperatorsService::new(Db::new(pool))
        .create_operator(NewOperator {
            username: args.username,
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create operator: {error}"))?;

    println!("operator_uuid: {}", issued.operator.uuid);
    println!("username: {}", issued.operator.username);
    println!("role: {}", issued.operator.role);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
