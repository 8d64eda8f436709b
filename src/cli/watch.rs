//! Watch command implementation

use super::output::render_view;
use super::{Console, WatchArgs};
use std::time::Duration;

/// How often the rendered state is checked for a newly completed cycle.
const RENDER_CHECK_INTERVAL: Duration = Duration::from_millis(200);

/// Handle `mosdash watch`
///
/// Renders once per completed cycle until Ctrl-C or `--count` refreshes.
/// Screens that don't poll are rendered once.
pub async fn handle_watch(
    args: &WatchArgs,
    console: &Console,
) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = &console.orchestrator;
    orchestrator.navigate(args.view).await;

    let mut last_rendered = None;
    let mut rendered = 0usize;
    let mut check = tokio::time::interval(RENDER_CHECK_INTERVAL);

    loop {
        let state = orchestrator.state();
        if state.last_cycle_completed_at != last_rendered {
            last_rendered = state.last_cycle_completed_at;
            rendered += 1;

            // Clear screen and home the cursor between frames.
            print!("\x1B[2J\x1B[H");
            println!(
                "{}",
                render_view(args.view, &console.settings.get(), &state)
            );
            if let Some(at) = last_rendered {
                println!("Updated {}", at.format("%H:%M:%S"));
            }

            if !orchestrator.is_polling() || args.count.is_some_and(|count| rendered >= count) {
                break;
            }
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = check.tick() => {}
        }
    }

    orchestrator.dispose();
    Ok(())
}
