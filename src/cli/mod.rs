pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster CLI - run and administer the profile/contact API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve,

    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Database maintenance and lookups")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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
        Commands::Serve => crate::server::serve(config).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, &config, output_format),
        Commands::Db { cmd } => commands::db::handle(cmd, &config, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::auth::AuthCommands;
    use commands::db::DbCommands;

    #[test]
    fn parses_token_command() {
        let cli = Cli::try_parse_from([
            "roster",
            "--json",
            "auth",
            "token",
            "--user-id",
            "6f1c1f2e-3b7a-4a8e-9a59-0f6a5b0c2d11",
            "--email",
            "ops@example.com",
        ])
        .unwrap();

        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        match cli.command {
            Commands::Auth { cmd: AuthCommands::Token { email, hours, .. } } => {
                assert_eq!(email, "ops@example.com");
                assert_eq!(hours, None);
            }
            _ => panic!("expected auth token"),
        }
    }

    #[test]
    fn parses_db_commands() {
        let cli = Cli::try_parse_from(["roster", "db", "admin-emails"]).unwrap();
        assert!(matches!(cli.command, Commands::Db { cmd: DbCommands::AdminEmails }));

        let cli = Cli::try_parse_from(["roster", "db", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Db { cmd: DbCommands::Schema }));

        assert!(Cli::try_parse_from(["roster", "schema"]).is_err());
    }

    #[test]
    fn rejects_malformed_user_id() {
        assert!(Cli::try_parse_from(["roster", "auth", "token", "--user-id", "nope", "--email", "a@b.c"]).is_err());
    }
}
