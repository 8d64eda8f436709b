//! Status, health, connect and upstreams commands

use super::output::{self, format_json, mode_label};
use super::{ConnectArgs, Console, OutputArgs};
use crate::orchestrator::ViewKind;
use colored::Colorize;
use serde_json::json;

/// Handle `mosdash status`
pub async fn handle_status(
    args: &OutputArgs,
    console: &Console,
) -> Result<String, Box<dyn std::error::Error>> {
    let state = console.snapshot(ViewKind::Dashboard).await;
    let connection = console.settings.get();

    if args.json {
        return Ok(output::format_status_json(&connection, &state)?);
    }
    Ok(output::format_status(&connection, &state))
}

/// Handle `mosdash health`
pub async fn handle_health(
    args: &OutputArgs,
    console: &Console,
) -> Result<String, Box<dyn std::error::Error>> {
    let connection = console.settings.get();
    let healthy = console.orchestrator.check_health().await;

    if args.json {
        return Ok(serde_json::to_string_pretty(&json!({
            "baseUrl": connection.base_url,
            "healthy": healthy,
        }))?);
    }

    let status = if healthy {
        "✓ reachable".green()
    } else {
        "✗ unreachable".red()
    };
    Ok(format!("{}: {}", connection.base_url, status))
}

/// Handle `mosdash connect`
///
/// Persists the new connection and refreshes against it right away, so the
/// reply already reflects whether the backend answers.
pub async fn handle_connect(
    args: &ConnectArgs,
    console: &Console,
) -> Result<String, Box<dyn std::error::Error>> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => console.settings.get().instance_name.clone(),
    };

    let connection = console.orchestrator.reconnect(&args.url, &name).await;
    console.orchestrator.dispose();
    let state = console.orchestrator.state();

    Ok(format!(
        "✓ Connection saved: {} ({})\n  Mode: {}",
        connection.instance_name,
        connection.base_url,
        mode_label(state.mode())
    ))
}

/// Handle `mosdash upstreams`
pub async fn handle_upstreams(
    args: &OutputArgs,
    console: &Console,
) -> Result<String, Box<dyn std::error::Error>> {
    let state = console.snapshot(ViewKind::Upstreams).await;

    if args.json {
        return Ok(format_json("upstreams", &state.upstreams)?);
    }

    let connection = console.settings.get();
    Ok(output::format_header(&connection, &state)
        + &output::format_upstreams_table(&state.upstreams))
}
