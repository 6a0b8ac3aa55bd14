use realty_listings::config::AppConfig;
use realty_listings::error::AppError;
use realty_listings::listings::{PropertyCatalog, PropertyRepository};
use realty_listings::seed::{mask_connection_string, reseed, SeedReport};
use realty_listings::storage::Database;
use realty_listings::telemetry;
use std::sync::Arc;

pub(crate) async fn run_seed() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let database_url = config.storage.require_database_url()?;

    println!(
        "Connection string (masked): {}",
        mask_connection_string(database_url)
    );
    println!("Attempting to connect to the database...");

    match seed_database(database_url, &config).await {
        Ok(report) => {
            println!("✓ Cleared {} existing properties", report.removed);
            println!(
                "✓ Seed complete - {} properties inserted",
                report.inserted.len()
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("✗ Seed failed: {err}");
            if err.is_authentication_failure() {
                print_authentication_help();
            }
            Err(err)
        }
    }
}

async fn seed_database(database_url: &str, config: &AppConfig) -> Result<SeedReport, AppError> {
    let database = Database::connect(database_url, &config.storage).await?;
    println!("✓ Database connected successfully!");

    let outcome = async {
        database.migrate().await?;
        let repository: Arc<dyn PropertyRepository> = Arc::new(database.properties());
        let catalog =
            PropertyCatalog::new(repository).with_timeout(config.storage.request_timeout);
        Ok::<_, AppError>(reseed(&catalog).await?)
    }
    .await;

    database.close().await;
    outcome
}

fn print_authentication_help() {
    eprintln!("\n=== TROUBLESHOOTING ===");
    eprintln!("1. Confirm the user and password in DATABASE_URL match a role on the server");
    eprintln!("2. Check that the role is allowed to log in and to connect to the database");
    eprintln!("3. If the password changed, update DATABASE_URL in the environment or .env file");
    eprintln!("4. Verify the server accepts connections from this host (pg_hba.conf / network rules)");
    eprintln!("5. Try a freshly created role with a new password");
}
