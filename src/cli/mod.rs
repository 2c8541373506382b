pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "cmsctl")]
#[command(about = "cmsctl - Operator CLI for the CMS content gateway")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Generate site API keys")]
    Keygen {
        #[arg(long, help = "Number of keys to generate", default_value = "1")]
        count: u32,
    },

    #[command(about = "Check gateway health via the /health endpoint")]
    Health {
        #[arg(long, env = "CMS_API_URL", help = "Gateway base URL", default_value = utils::DEFAULT_API_URL)]
        url: String,
    },

    #[command(about = "Fetch content through a running gateway")]
    Content {
        #[arg(long, env = "CMS_API_URL", help = "Gateway base URL", default_value = utils::DEFAULT_API_URL)]
        url: String,
        #[arg(long, env = "CMS_API_KEY", help = "Site API key sent as x-api-key")]
        api_key: String,
        #[command(subcommand)]
        cmd: commands::content::ContentCommands,
    },

    #[command(about = "Content fixture validation")]
    Fixture {
        #[command(subcommand)]
        cmd: commands::fixture::FixtureCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

    match cli.command {
        Commands::Keygen { count } => commands::keygen::handle(count, output_format),
        Commands::Health { url } => commands::health::handle(&url, output_format).await,
        Commands::Content { url, api_key, cmd } => {
            commands::content::handle(&url, &api_key, cmd, output_format).await
        }
        Commands::Fixture { cmd } => commands::fixture::handle(cmd, output_format),
    }
}
