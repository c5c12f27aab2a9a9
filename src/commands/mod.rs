/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`   — Interactive chat session
- `query`  — Submit a single query and print the reply
- `ingest` — Upload a PDF document for analysis

These handlers are intentionally small and use the library components:
the backend client, the message store, and the session controller.
*/

use std::path::Path;
use std::sync::Arc;

use crate::client::ApiClient;
use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::error::Result;
use crate::render;
use crate::session::{
    MessageStore, SessionController, SubmitOutcome, UploadLifecycleManager, UploadOutcome,
};

// Special commands parser for the interactive loop
pub mod special_commands;

/// One wired-up conversation: store, controller, and upload manager
struct ChatSession {
    store: Arc<MessageStore>,
    controller: Arc<SessionController>,
    uploader: Arc<UploadLifecycleManager>,
}

impl ChatSession {
    fn new(config: &Config) -> Result<Self> {
        let client = ApiClient::new(&config.backend)?;
        let store = Arc::new(MessageStore::new());
        let controller = Arc::new(SessionController::new(
            client.clone(),
            Arc::clone(&store),
            config.chat.thinking_notice.clone(),
        ));
        let uploader = Arc::new(UploadLifecycleManager::new(
            client,
            Arc::clone(&store),
            Arc::clone(&controller),
        ));
        Ok(Self {
            store,
            controller,
            uploader,
        })
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat session handler.
    //!
    //! Wires the controller and upload manager to a shared message store
    //! and runs a readline-based loop. Queries are awaited in place;
    //! uploads are spawned so they can overlap a pending query.

    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start an interactive chat session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat session");

        let session = ChatSession::new(&config)?;
        let mut rl = DefaultEditor::new()?;

        if config.chat.show_banner {
            render::print_banner(&config.backend.base_url);
        }

        loop {
            let active = session.controller.active_document();
            let prompt = render::format_prompt(active.as_deref());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    match parse_special_command(trimmed) {
                        SpecialCommand::NewChat => {
                            session.controller.reset_session();
                            println!("Started a new chat.\n");
                            continue;
                        }
                        SpecialCommand::Upload(path) => {
                            spawn_upload(&session, path);
                            continue;
                        }
                        SpecialCommand::Status => {
                            print_status(&session);
                            continue;
                        }
                        SpecialCommand::Help => {
                            print_help();
                            continue;
                        }
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {}
                    }

                    println!("{}", config.chat.thinking_notice.dimmed());
                    match session.controller.submit_query(trimmed).await {
                        SubmitOutcome::Answered(id) | SubmitOutcome::Failed(id) => {
                            if let Some(message) = session.store.get(id) {
                                render::print_message(&message);
                            }
                            println!();
                        }
                        SubmitOutcome::RejectedBusy => {
                            println!("{}", "A query is already in flight.".yellow());
                        }
                        SubmitOutcome::RejectedEmpty | SubmitOutcome::Discarded => {}
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    break;
                }
            }
        }

        println!("Bye.");
        Ok(())
    }

    /// Spawn a document upload so it can overlap a pending query
    fn spawn_upload(session: &ChatSession, path: String) {
        println!("{}", format!("Uploading {}...", path).cyan());
        let uploader = Arc::clone(&session.uploader);
        let store = Arc::clone(&session.store);
        tokio::spawn(async move {
            match uploader.upload_document(Path::new(&path)).await {
                Ok(UploadOutcome::Ready(id)) | Ok(UploadOutcome::Failed(id)) => {
                    if let Some(message) = store.get(id) {
                        render::print_message(&message);
                    }
                }
                Err(e) => println!("{}", e.to_string().red()),
            }
        });
    }

    fn print_status(session: &ChatSession) {
        let session_id = session
            .controller
            .session_id()
            .unwrap_or_else(|| "(none)".to_string());
        let active = session
            .controller
            .active_document()
            .unwrap_or_else(|| "(none)".to_string());
        println!("Session:         {}", session_id);
        println!("Active document: {}", active);
        println!("Query in flight: {}", session.controller.is_busy());
        println!("Messages:        {}", session.store.len());
    }
}

// One-shot query handler
pub mod query {
    //! Submit a single query and print the reply.

    use super::*;

    /// Run one query against the backend and print the result
    ///
    /// # Errors
    ///
    /// Returns an error if the query is empty or the round-trip failed,
    /// so the process exits non-zero for scripting.
    pub async fn run_query(config: Config, text: &str) -> Result<()> {
        let session = ChatSession::new(&config)?;
        match session.controller.submit_query(text).await {
            SubmitOutcome::Answered(id) => {
                if let Some(message) = session.store.get(id) {
                    render::print_message(&message);
                }
                Ok(())
            }
            SubmitOutcome::Failed(id) => {
                if let Some(message) = session.store.get(id) {
                    render::print_message(&message);
                }
                anyhow::bail!("query failed")
            }
            SubmitOutcome::RejectedEmpty => anyhow::bail!("query text is empty"),
            // A fresh controller cannot be busy or reset mid-flight
            SubmitOutcome::RejectedBusy | SubmitOutcome::Discarded => Ok(()),
        }
    }
}

// One-shot ingestion handler
pub mod ingest {
    //! Upload a single PDF document for analysis.

    use super::*;

    /// Upload one document and print the outcome
    ///
    /// # Errors
    ///
    /// Returns an error for a rejected file (wrong type, unreadable) or a
    /// failed ingestion, so the process exits non-zero for scripting.
    pub async fn run_ingest(config: Config, file: &Path) -> Result<()> {
        let session = ChatSession::new(&config)?;
        match session.uploader.upload_document(file).await? {
            UploadOutcome::Ready(id) => {
                if let Some(message) = session.store.get(id) {
                    render::print_message(&message);
                }
                Ok(())
            }
            UploadOutcome::Failed(id) => {
                if let Some(message) = session.store.get(id) {
                    render::print_message(&message);
                }
                anyhow::bail!("upload failed")
            }
        }
    }
}
