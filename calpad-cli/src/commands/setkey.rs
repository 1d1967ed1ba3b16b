use anyhow::{Context, Result};
use calpad_core::config::CalpadConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let key = rpassword::prompt_password("Gemini API key: ")?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("No key entered.");
    }

    let path = CalpadConfig::api_key_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }
    std::fs::write(&path, key).with_context(|| format!("Could not write {}", path.display()))?;

    println!("{}", format!("Saved API key to {}", path.display()).green());
    Ok(())
}
