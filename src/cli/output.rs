//! Output formatting helpers for CLI commands

use crate::gateway::{QueryLogEntry, QueryStatus, TopDomain, UpstreamServer, UpstreamStatus};
use crate::orchestrator::{ConnectionMode, DashboardState, ViewKind};
use crate::settings::ConnectionConfig;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;

/// Connection mode, coloured.
pub fn mode_label(mode: ConnectionMode) -> String {
    match mode {
        ConnectionMode::Online => mode.to_string().green().to_string(),
        ConnectionMode::DemoMode => mode.to_string().yellow().to_string(),
    }
}

/// Get status icon for upstream status
pub fn status_icon(status: UpstreamStatus) -> &'static str {
    match status {
        UpstreamStatus::Online => "✓",
        UpstreamStatus::Degraded => "~",
        UpstreamStatus::Offline => "✗",
    }
}

fn upstream_status_label(status: UpstreamStatus) -> String {
    let label = format!("{} {}", status_icon(status), status);
    match status {
        UpstreamStatus::Online => label.green().to_string(),
        UpstreamStatus::Degraded => label.yellow().to_string(),
        UpstreamStatus::Offline => label.red().to_string(),
    }
}

fn query_status_label(status: QueryStatus) -> String {
    match status {
        QueryStatus::NoError => status.to_string().green().to_string(),
        QueryStatus::NxDomain => status.to_string().yellow().to_string(),
        QueryStatus::ServFail => status.to_string().red().to_string(),
    }
}

/// Connection header printed above every screen.
pub fn format_header(connection: &ConnectionConfig, state: &DashboardState) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{} ({})  {}",
        connection.instance_name.bold(),
        connection.base_url,
        mode_label(state.mode())
    );
    if state.mode() == ConnectionMode::DemoMode {
        let _ = writeln!(
            output,
            "{}",
            "Backend unreachable, showing sample data.".dimmed()
        );
    }
    output
}

/// Stats block, peak hour and top domains.
pub fn format_status(connection: &ConnectionConfig, state: &DashboardState) -> String {
    let mut output = format_header(connection, state);
    let _ = writeln!(output);

    match &state.stats {
        Some(stats) => {
            let _ = writeln!(output, "Total queries:  {}", stats.total_queries);
            let _ = writeln!(output, "Avg latency:    {:.1}ms", stats.avg_latency);
            let _ = writeln!(output, "Cache hit rate: {:.1}%", stats.cache_hit_rate);
            let _ = writeln!(output, "Active clients: {}", stats.active_clients);
        }
        None => {
            let _ = writeln!(output, "No stats loaded");
        }
    }

    if let Some(peak) = state.history.iter().max_by_key(|point| point.queries) {
        let _ = writeln!(
            output,
            "Peak hour:      {} ({} queries, {} cache hits)",
            peak.time, peak.queries, peak.cache_hits
        );
    }

    if !state.top_domains.is_empty() {
        let _ = writeln!(output);
        let _ = write!(output, "{}", format_top_domains_table(&state.top_domains));
    }

    output
}

pub fn format_top_domains_table(domains: &[TopDomain]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Domain", "Queries", "Share"]);

    for d in domains {
        table.add_row(vec![
            Cell::new(&d.domain),
            Cell::new(d.count),
            Cell::new(format!("{:.0}%", d.pct)),
        ]);
    }

    table.to_string()
}

pub fn format_upstreams_table(upstreams: &[UpstreamServer]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Name", "Address", "Protocol", "Status", "Latency", "Requests",
    ]);

    for u in upstreams {
        table.add_row(vec![
            Cell::new(&u.name),
            Cell::new(&u.address),
            Cell::new(u.protocol),
            Cell::new(upstream_status_label(u.status)),
            Cell::new(format!("{:.1}ms", u.latency_ms)),
            Cell::new(u.total_requests),
        ]);
    }

    table.to_string()
}

pub fn format_logs_table(logs: &[QueryLogEntry]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Time", "Domain", "Type", "Client", "Upstream", "Latency", "Status",
    ]);

    for l in logs {
        table.add_row(vec![
            Cell::new(&l.timestamp),
            Cell::new(&l.domain),
            Cell::new(&l.record_type),
            Cell::new(&l.client_address),
            Cell::new(&l.upstream_name),
            Cell::new(format!("{:.1}ms", l.latency_ms)),
            Cell::new(query_status_label(l.status)),
        ]);
    }

    table.to_string()
}

/// Render whatever `view` shows, for `watch`.
pub fn render_view(view: ViewKind, connection: &ConnectionConfig, state: &DashboardState) -> String {
    match view {
        ViewKind::Dashboard | ViewKind::AiAssistant => format_status(connection, state),
        ViewKind::Upstreams => {
            format_header(connection, state) + &format_upstreams_table(&state.upstreams)
        }
        ViewKind::Logs => format_header(connection, state) + &format_logs_table(&state.logs),
        ViewKind::ConfigEditor => {
            format_header(connection, state) + state.config_yaml.as_deref().unwrap_or_default()
        }
    }
}

/// Wrap `value` under `key` as pretty JSON.
pub fn format_json<T: Serialize>(key: &str, value: &T) -> Result<String, serde_json::Error> {
    let mut object = serde_json::Map::new();
    object.insert(key.to_string(), serde_json::to_value(value)?);
    serde_json::to_string_pretty(&serde_json::Value::Object(object))
}

/// Full status document for `status --json`.
pub fn format_status_json(
    connection: &ConnectionConfig,
    state: &DashboardState,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "connection": connection,
        "mode": state.mode(),
        "isRealConnection": state.is_real_connection,
        "stats": state.stats,
        "history": state.history,
        "topDomains": state.top_domains,
    }))
}
