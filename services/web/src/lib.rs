mod assets;
mod cli;
mod error;
mod infra;
mod pages;
mod routes;
mod seed;
mod server;

use realty_listings::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
