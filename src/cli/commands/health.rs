use serde_json::Value;

use crate::cli::utils::{endpoint, output_error, output_json, output_success};
use crate::cli::OutputFormat;

pub async fn handle(url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let target = endpoint(url, "/health");
    let response = reqwest::get(&target).await?;
    let status = response.status();
    let body: Value = response.json().await?;

    match output_format {
        OutputFormat::Json => output_json(&body)?,
        OutputFormat::Text if status.is_success() => {
            output_success(&output_format, &format!("{} is healthy", url), None)?;
        }
        OutputFormat::Text => {
            output_error(
                &output_format,
                &format!("{} is degraded (database {})", url, body["database"].as_str().unwrap_or("unknown")),
                None,
            )?;
        }
    }

    if !status.is_success() {
        return Err(anyhow::anyhow!("health check returned {}", status));
    }
    Ok(())
}
