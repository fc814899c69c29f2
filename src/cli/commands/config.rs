use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::DatabaseManager;

/// Print the effective configuration with the database password masked
pub fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let shown = redacted(config);

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shown)?),
        OutputFormat::Text => print!("{}", serde_yaml::to_string(&shown)?),
    }
    Ok(())
}

fn redacted(config: &AppConfig) -> AppConfig {
    let mut shown = config.clone();
    shown.database.url = shown.database.url.as_deref().map(|raw| {
        DatabaseManager::redacted_url(raw).unwrap_or_else(|_| "<invalid url>".to_string())
    });
    shown
}
