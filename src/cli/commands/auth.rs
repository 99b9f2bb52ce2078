use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Mint a bearer token for an existing user")]
    Token {
        #[arg(long, help = "User id (token subject)")]
        user_id: Uuid,
        #[arg(long, help = "User email")]
        email: String,
        #[arg(long, help = "Validity in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },
}

pub fn handle(cmd: AuthCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Token { user_id, email, hours } => {
            let hours = hours.unwrap_or(config.security.jwt_expiry_hours);
            let claims = Claims::new(user_id, email, hours);
            let token = generate_jwt(&claims, &config.security.jwt_secret)?;

            match output_format {
                OutputFormat::Json => println!("{}", json!({ "token": token, "expires_at": claims.exp })),
                OutputFormat::Text => println!("{token}"),
            }
            Ok(())
        }
    }
}
