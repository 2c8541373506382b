use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::{Fixture, MemoryStore};
use crate::types::ContentKind;

#[derive(Subcommand)]
pub enum FixtureCommands {
    #[command(about = "Validate a content fixture file for the memory store")]
    Check {
        #[arg(help = "Path to the fixture JSON file")]
        path: PathBuf,
    },
}

pub fn handle(cmd: FixtureCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        FixtureCommands::Check { path } => handle_check(path, output_format),
    }
}

fn handle_check(path: PathBuf, output_format: OutputFormat) -> anyhow::Result<()> {
    if !path.exists() {
        return Err(anyhow::anyhow!("Fixture file '{}' not found", path.display()));
    }

    let fixture = Fixture::load(&path)?;
    let inactive: Vec<String> = fixture
        .sites
        .iter()
        .filter(|site| !site.active)
        .map(|site| site.slug.clone())
        .collect();
    let store = MemoryStore::from_fixture(fixture)?;

    let summary = json!({
        "fixture": path.display().to_string(),
        "sites": store.site_count(),
        "inactive_sites": inactive,
        "globals": store.global_count(),
        "projects": store.document_count(ContentKind::Projects),
        "pages": store.document_count(ContentKind::Pages),
    });

    output_success(&output_format, &format!("Fixture '{}' is valid", path.display()), Some(summary.clone()))?;
    if let OutputFormat::Text = output_format {
        println!("  sites:    {} ({} inactive)", summary["sites"], inactive.len());
        println!("  globals:  {}", summary["globals"]);
        println!("  projects: {}", summary["projects"]);
        println!("  pages:    {}", summary["pages"]);
    }
    Ok(())
}
