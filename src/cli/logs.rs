//! Logs command implementation

use super::output::{self, format_json};
use super::{Console, LogsArgs};
use crate::gateway::QueryLogEntry;
use crate::orchestrator::ViewKind;

/// Apply `--search` and `--limit` to newest-first entries.
pub fn filter_logs<'a>(
    logs: &'a [QueryLogEntry],
    search: Option<&str>,
    limit: Option<usize>,
) -> Vec<&'a QueryLogEntry> {
    logs.iter()
        .filter(|entry| search.is_none_or(|query| entry.matches(query)))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Handle `mosdash logs`
pub async fn handle_logs(
    args: &LogsArgs,
    console: &Console,
) -> Result<String, Box<dyn std::error::Error>> {
    let state = console.snapshot(ViewKind::Logs).await;
    let logs: Vec<QueryLogEntry> = filter_logs(&state.logs, args.search.as_deref(), args.limit)
        .into_iter()
        .cloned()
        .collect();

    if args.json {
        return Ok(format_json("logs", &logs)?);
    }

    let connection = console.settings.get();
    Ok(output::format_header(&connection, &state) + &output::format_logs_table(&logs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fallback;

    #[test]
    fn test_filter_without_search_keeps_all() {
        let logs = fallback::logs();
        assert_eq!(filter_logs(&logs, None, None).len(), 3);
    }

    #[test]
    fn test_filter_search_case_insensitive() {
        let logs = fallback::logs();
        let found = filter_logs(&logs, Some("TRACKING"), None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].domain, "ads.tracking.com");
    }

    #[test]
    fn test_filter_search_matches_client() {
        let logs = fallback::logs();
        assert_eq!(filter_logs(&logs, Some("192.168.1.5"), None).len(), 2);
    }

    #[test]
    fn test_filter_limit_keeps_newest() {
        let logs = fallback::logs();
        let found = filter_logs(&logs, None, Some(1));
        assert_eq!(found, vec![&logs[0]]);
    }
}
