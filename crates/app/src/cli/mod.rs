use bazaar_app::{
    context::AppContext,
    database::{self, Db},
};
use clap::{Args, Parser, Subcommand};

mod category;
mod product;

/// One command runs at a time; a second connection covers migrations.
const CLI_MAX_CONNECTIONS: u32 = 2;

#[derive(Debug, Parser)]
#[command(name = "bazaar-app", about = "Bazaar catalog CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Category(category::CategoryCommand),
    Product(product::ProductCommand),
}

/// Connection options shared by every command.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    /// Connect, apply pending migrations and build the services.
    pub(crate) async fn connect(&self) -> Result<AppContext, String> {
        let pool = database::connect(&self.database_url, CLI_MAX_CONNECTIONS)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        database::migrate(&pool)
            .await
            .map_err(|error| format!("failed to migrate database: {error}"))?;

        Ok(AppContext::from_db(Db::new(pool)))
    }
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Category(command) => category::run(command).await,
            Commands::Product(command) => product::run(command).await,
        }
    }
}
