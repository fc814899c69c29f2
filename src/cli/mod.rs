pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "collectibles-api")]
#[command(about = "Collectibles API - REST catalogue of collections and collectives")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create the PostgreSQL tables for every resource")]
    InitDb,

    #[command(about = "Print the effective configuration")]
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config().clone();

    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::InitDb) => commands::init_db::handle(config, output_format).await,
        Some(Commands::Config) => commands::config::handle(&config, output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["collectibles-api"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Text);
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from([
            "collectibles-api",
            "serve",
            "--port",
            "4000",
            "--backend",
            "memory",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.port, Some(4000));
                assert_eq!(args.backend, Some(crate::config::StoreBackend::Memory));
                assert!(args.host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn global_json_flag() {
        let cli = Cli::try_parse_from(["collectibles-api", "config", "--json"]).unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
    }
}
