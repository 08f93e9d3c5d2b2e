//! Presentation: generated contents and resolved commands as text or JSON.

use crate::cli::OutputFormat;
use crate::context::Content;
use comfy_table::Table;
use serde_json::json;

pub fn format_contents(contents: &[Content], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = contents
                .iter()
                .map(|c| {
                    json!({
                        "kind": c.kind.as_str(),
                        "name": c.name,
                        "path": c.path.to_string_lossy().replace('\\', "/"),
                        "digest": c.digest(),
                    })
                })
                .collect();
            serde_json::to_string_pretty(&entries)
        }
        OutputFormat::Text if contents.is_empty() => Ok("Nothing generated.".to_string()),
        OutputFormat::Text => {
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Kind", "Name", "Path", "Digest"]);
            for content in contents {
                let digest = content.digest();
                table.add_row(vec![
                    content.kind.as_str().to_string(),
                    content.name.clone(),
                    content.path.display().to_string(),
                    digest[..12].to_string(),
                ]);
            }
            Ok(format!("Generated {} file(s):\n{}", contents.len(), table))
        }
    }
}

/// Commands one per line, ready for a shell.
pub fn format_commands(commands: &[String]) -> String {
    commands.join("\n")
}
