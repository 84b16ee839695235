use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Maintenance commands for the coupon API", long_about = None)]
#[command(name = "coupon-cli")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wipes the database and loads a fixture (available: `demo`).
    RunFixture {
        /// Fixture id.
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let cfg = configs::AppConfig::load_and_validate()?;
    common::utils::logging::init_logging(&cfg.server.log_format);

    match cli.command {
        Commands::RunFixture { id } => {
            let db = models::db::connect_and_migrate(&cfg.database).await?;
            let summary = service::fixtures::run(&db, &id).await?;
            info!(fixture = %id, customers = summary.customers, coupons = summary.coupons, "fixture loaded");
        }
    }
    Ok(())
}
