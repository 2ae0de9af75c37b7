use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use trivia_api::db::queries::categories::{get_all_categories, import_categories};
use trivia_api::db::queries::questions::{get_all_questions, import_questions};
use trivia_api::db::{self, Category, Question};
use trivia_api::settings::get_settings;
use trivia_api::telemetry::init_tracing;

const CATEGORIES_FILE: &str = "categories.csv";
const QUESTIONS_FILE: &str = "questions.csv";

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database path, overrides the configured one
    #[clap(long)]
    db_path: Option<PathBuf>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    Migrate,
    /// Import categories and questions from CSV files in a directory
    Import { path: PathBuf },
    /// Export categories and questions to CSV files in a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let db_path = match cli.db_path {
        Some(path) => path,
        None => get_settings().context("Failed to load configuration")?.database.path,
    };
    let pool = db::establish_connection(&db_path)
        .await
        .with_context(|| format!("Cannot connect to {}", db_path.display()))?;
    db::run_migrations(&pool).await.context("Failed to run migrations")?;

    match cli.command {
        Commands::Migrate => tracing::info!("Database {} is up to date", db_path.display()),
        Commands::Export { path } => export_data(&pool, &path).await.context("Cannot export")?,
        Commands::Import { path } => import_data(&pool, &path).await.context("Cannot import")?,
    }
    Ok(())
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    rows.iter().try_for_each(|row| writer.serialize(row))?;
    writer.flush()?;
    tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Cannot open {}", path.display()))?;
    reader
        .deserialize()
        .enumerate()
        .map(|(n, row)| row.with_context(|| format!("{} row {}", path.display(), n + 1)))
        .collect()
}

async fn export_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    std::fs::create_dir_all(path)?;
    write_csv(&path.join(CATEGORIES_FILE), &categories)?;
    write_csv(&path.join(QUESTIONS_FILE), &questions)?;
    Ok(())
}

async fn import_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_csv(&path.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_csv(&path.join(QUESTIONS_FILE))?;
    tracing::info!(
        "Importing {} categories and {} questions",
        categories.len(),
        questions.len()
    );
    // categories first, questions reference them
    import_categories(pool, categories).await?;
    import_questions(pool, questions).await?;
    Ok(())
}
