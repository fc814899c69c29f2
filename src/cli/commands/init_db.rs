use anyhow::Context;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::models::Resource;

pub async fn handle(config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to PostgreSQL")?;

    let mut tables = Vec::new();
    for resource in Resource::ALL {
        DatabaseManager::ensure_table(&pool, resource.table_name())
            .await
            .with_context(|| format!("failed to create table {}", resource.table_name()))?;
        tables.push(resource.table_name());
    }
    DatabaseManager::close(&pool).await;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "success": true, "tables": tables })),
        OutputFormat::Text => {
            for table in tables {
                println!("✓ {}", table);
            }
        }
    }
    Ok(())
}
