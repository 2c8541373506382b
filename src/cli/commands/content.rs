use clap::Subcommand;
use serde_json::Value;

use crate::cli::utils::{endpoint, output_json};
use crate::cli::OutputFormat;
use crate::middleware::API_KEY_HEADER;

#[derive(Subcommand)]
pub enum ContentCommands {
    #[command(about = "Fetch a site global by key")]
    Global {
        #[arg(help = "Global key (e.g., 'hero')")]
        key: String,
    },

    #[command(about = "List documents in a public collection")]
    Collection {
        #[arg(help = "Collection name ('projects' or 'pages')")]
        kind: String,
        #[arg(long, help = "Only the document with this slug")]
        slug: Option<String>,
        #[arg(long, help = "Status filter; 'all' disables it")]
        status: Option<String>,
        #[arg(long, help = "Sort field, '-' prefix for descending")]
        sort: Option<String>,
        #[arg(long, help = "Page size")]
        limit: Option<u32>,
        #[arg(long, help = "Page number (1-indexed)")]
        page: Option<u32>,
    },
}

impl ContentCommands {
    /// Query-string pairs for `GET /content`
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            ContentCommands::Global { key } => {
                vec![("type", "global".to_string()), ("key", key.clone())]
            }
            ContentCommands::Collection { kind, slug, status, sort, limit, page } => {
                let mut query = vec![("type", "collection".to_string()), ("key", kind.clone())];
                if let Some(v) = slug {
                    query.push(("slug", v.clone()));
                }
                if let Some(v) = status {
                    query.push(("status", v.clone()));
                }
                if let Some(v) = sort {
                    query.push(("sort", v.clone()));
                }
                if let Some(v) = limit {
                    query.push(("limit", v.to_string()));
                }
                if let Some(v) = page {
                    query.push(("page", v.to_string()));
                }
                query
            }
        }
    }
}

pub async fn handle(
    url: &str,
    api_key: &str,
    cmd: ContentCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let response = reqwest::Client::new()
        .get(endpoint(url, "/content"))
        .header(API_KEY_HEADER, api_key)
        .query(&cmd.query())
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;

    if !status.is_success() {
        let message = body["message"].as_str().unwrap_or("request failed");
        return Err(anyhow::anyhow!("{} ({})", message, status));
    }

    match (output_format, &cmd) {
        (OutputFormat::Json, _) | (OutputFormat::Text, ContentCommands::Global { .. }) => output_json(&body)?,
        (OutputFormat::Text, ContentCommands::Collection { kind, .. }) => print_collection(kind, &body),
    }
    Ok(())
}

fn print_collection(kind: &str, body: &Value) {
    let docs = body["data"].as_array().map(Vec::as_slice).unwrap_or_default();
    println!(
        "{}: {} of {} (page {}/{}, limit {})",
        kind,
        docs.len(),
        body["totalDocs"],
        body["page"],
        body["totalPages"],
        body["limit"]
    );
    for doc in docs {
        let slug = doc["slug"].as_str().unwrap_or("-");
        let status = doc["status"].as_str().unwrap_or("-");
        match doc["title"].as_str() {
            Some(title) => println!("  {:<32} {:<10} {}", slug, status, title),
            None => println!("  {:<32} {}", slug, status),
        }
    }
}
