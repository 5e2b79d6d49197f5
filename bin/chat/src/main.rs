//! Terminal front end for the FinSmart financial assistant.
//!
//! Each line read from stdin is a submission; replies, the typing indicator
//! and notices are printed as the session changes. Logs go to stderr.

mod command;
mod error;
mod render;
mod settings;

use command::Command;
use error::ChatError;
use finsmart_conversation::{ResponseProvider, SessionController};
use render::TranscriptView;
use settings::ChatConfig;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> finsmart_core::Result<(), ChatError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ChatConfig::from_env().map_err(|e| ChatError::Config {
        details: e.to_string(),
    })?;
    tracing::debug!(?config, "loaded configuration");

    let session = config
        .assistant
        .new_session()
        .map_err(|e| ChatError::Config {
            details: e.to_string(),
        })?;
    tracing::info!(session_id = %session.id(), "assistant session started");

    let provider: Arc<dyn ResponseProvider> = Arc::new(config.assistant.canned_responder());
    let mut controller = SessionController::new(session, provider)
        .map_err(|e| ChatError::Runtime {
            details: e.to_string(),
        })?
        .with_response_timeout(config.assistant.response_timeout());
    let mut updates = controller.subscribe();
    let mut view = TranscriptView::default();

    println!("{}", render::header());
    print_lines(view.update(&updates.borrow_and_update()));

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = input.next_line() => {
                let line = line.map_err(|e| ChatError::Terminal {
                    details: e.to_string(),
                })?;
                let Some(line) = line else {
                    break;
                };

                match Command::parse(&line) {
                    Command::Quit => break,
                    Command::Help => println!("{}", command::HELP),
                    Command::Export => {
                        let json = serde_json::to_string_pretty(&controller.snapshot())
                            .map_err(|e| ChatError::Export {
                                details: e.to_string(),
                            })?;
                        println!("{json}");
                    }
                    Command::Cancel => {
                        if let Err(e) = controller.cancel_pending() {
                            print_lines(render::rejection_line(&e));
                        }
                    }
                    Command::Submit(text) => {
                        if let Err(e) = controller.submit(text) {
                            print_lines(render::rejection_line(&e));
                        }
                    }
                }
            }
            _ = controller.next_event() => {}
        }

        print_lines(view.update(&updates.borrow_and_update()));
    }

    let session = controller.shutdown();
    tracing::info!(
        session_id = %session.id(),
        messages = session.message_count(),
        "assistant session closed"
    );
    Ok(())
}

fn print_lines(lines: impl IntoIterator<Item = String>) {
    for line in lines {
        println!("{line}");
    }
}
