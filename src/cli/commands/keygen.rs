use serde_json::json;

use crate::cli::OutputFormat;
use crate::gateway::generate_api_key;

pub fn handle(count: u32, output_format: OutputFormat) -> anyhow::Result<()> {
    if count == 0 {
        return Err(anyhow::anyhow!("--count must be at least 1"));
    }

    let keys: Vec<String> = (0..count).map(|_| generate_api_key()).collect();

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "keys": keys }))?);
        }
        OutputFormat::Text => {
            for key in &keys {
                println!("{}", key);
            }
        }
    }
    Ok(())
}
