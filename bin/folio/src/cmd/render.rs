//! Render command - converts a rich-text document to HTML

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use folio_richtext::Renderer;
use serde_json::Value;

/// Render the document in `file` and return the HTML.
pub fn render_file(file: &Path, escape: bool) -> Result<String> {
    let raw = fs::read_to_string(file)
        .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
    let document: Value = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("{} is not valid JSON", file.display()))?;

    let renderer = if escape {
        Renderer::escaping()
    } else {
        Renderer::new()
    };
    Ok(renderer.render_value(&document))
}

/// Run the render command.
pub fn run(file: &Path, escape: bool) -> Result<()> {
    println!("{}", render_file(file, escape)?);
    Ok(())
}
