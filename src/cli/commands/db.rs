use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::services::ContactService;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create missing tables and indexes")]
    Schema,

    #[command(about = "List email addresses of admin-level users")]
    AdminEmails,
}

pub async fn handle(cmd: DbCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DbCommands::Schema => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            DatabaseManager::ensure_schema(&pool).await?;
            pool.close().await;
            println!("Schema is up to date");
            Ok(())
        }
        DbCommands::AdminEmails => {
            let store = crate::server::build_store(config).await?;
            let emails = ContactService::new(store).admin_emails().await?;

            match output_format {
                OutputFormat::Json => println!("{}", json!(emails)),
                OutputFormat::Text => {
                    for email in emails {
                        println!("{email}");
                    }
                }
            }
            Ok(())
        }
    }
}
