//! Config command handlers

use super::{ConfigExplainArgs, ConfigSaveArgs, Console, InitArgs};
use crate::config::DashConfig;
use crate::orchestrator::ViewKind;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Handle `mosdash init`
pub fn handle_init(args: &InitArgs) -> Result<String, Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    fs::write(&args.output, DashConfig::default().to_toml()?)?;

    Ok(format!(
        "✓ Configuration file created: {}",
        args.output.display()
    ))
}

/// Handle `mosdash config show`
pub async fn handle_config_show(console: &Console) -> Result<String, Box<dyn std::error::Error>> {
    let state = console.snapshot(ViewKind::ConfigEditor).await;
    if !state.is_real_connection {
        tracing::warn!("Backend unreachable, showing sample config");
    }
    Ok(state.config_yaml.unwrap_or_default())
}

/// Handle `mosdash config save`
///
/// Loads the editor first so the upload goes through the same draft that an
/// interactive edit would.
pub async fn handle_config_save(
    args: &ConfigSaveArgs,
    console: &Console,
) -> Result<String, Box<dyn std::error::Error>> {
    let yaml = read_input(&args.file)?;

    console.snapshot(ViewKind::ConfigEditor).await;
    console.orchestrator.edit_config(yaml);

    if console.orchestrator.save_config().await {
        Ok(format!(
            "✓ Configuration saved to {}",
            console.settings.get().instance_name
        ))
    } else {
        Err("Failed to save configuration: backend rejected or unreachable".into())
    }
}

/// Handle `mosdash config review`
pub async fn handle_config_review(
    console: &Console,
) -> Result<String, Box<dyn std::error::Error>> {
    let state = console.snapshot(ViewKind::ConfigEditor).await;
    let yaml = state.config_yaml.unwrap_or_default();
    Ok(console.advisor().review_config(&yaml).await)
}

/// Handle `mosdash config explain`
pub async fn handle_config_explain(
    args: &ConfigExplainArgs,
    console: &Console,
) -> Result<String, Box<dyn std::error::Error>> {
    let rule = match &args.rule {
        Some(rule) => rule.clone(),
        None => read_input(Path::new("-"))?,
    };
    if rule.trim().is_empty() {
        return Err("Nothing to explain: rule text is empty".into());
    }
    Ok(console.advisor().explain_rule(&rule).await)
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String, std::io::Error> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}
