//! Ask command implementation

use super::{AskArgs, Console};
use crate::advisor::{AdvisorContext, ChatSession};
use crate::orchestrator::ViewKind;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Handle `mosdash ask "<question>"`
pub async fn handle_ask(
    args: &AskArgs,
    console: &Console,
) -> Result<String, Box<dyn std::error::Error>> {
    let session = ChatSession::new(console.advisor());
    match &args.question {
        Some(question) => {
            let context = current_context(console).await;
            let answer = session.ask(question, &context).await?;
            Ok(answer.content)
        }
        None => {
            run_interactive(&session, console).await?;
            Ok(String::new())
        }
    }
}

/// Snapshot for the assistant, taken fresh for each question.
async fn current_context(console: &Console) -> AdvisorContext {
    let state = console.snapshot(ViewKind::AiAssistant).await;
    AdvisorContext::from_state(&state, console.config.advisor.context_log_limit)
}

/// Read questions line by line until EOF or `exit`.
async fn run_interactive(
    session: &ChatSession,
    console: &Console,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(greeting) = session.transcript().first() {
        println!("{}", greeting.content.cyan());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question == "exit" || question == "quit" {
            break;
        }

        let context = current_context(console).await;
        let answer = session.ask(question, &context).await?;
        println!("{}\n", answer.content);
    }

    Ok(())
}
