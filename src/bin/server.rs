use anyhow::Context;
use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::settings::get_settings;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = get_settings().context("Failed to load configuration")?;
    let pool = db::establish_connection(&settings.database.path)
        .await
        .with_context(|| format!("Cannot open database {}", settings.database.path.display()))?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    run_server(pool, &settings.application).await
}
