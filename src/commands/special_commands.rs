//! Special command parsing for interactive chat
//!
//! Slash commands are handled by the chat loop itself and never reach the
//! backend: `/new`, `/upload <path>`, `/status`, `/help`, `/exit`.

/// A parsed special command, or `None` for a regular query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start a new chat, clearing the timeline and session state
    NewChat,
    /// Upload a PDF document
    Upload(String),
    /// Show session status
    Status,
    /// Show help text
    Help,
    /// Leave the chat
    Exit,
    /// Not a special command
    None,
}

/// Parse a line of user input for a special command
pub fn parse_special_command(input: &str) -> SpecialCommand {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return SpecialCommand::None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().map(str::trim).unwrap_or_default();

    match command {
        "/new" => SpecialCommand::NewChat,
        "/upload" if !rest.is_empty() => SpecialCommand::Upload(rest.to_string()),
        "/status" => SpecialCommand::Status,
        "/help" => SpecialCommand::Help,
        "/exit" | "/quit" => SpecialCommand::Exit,
        _ => SpecialCommand::None,
    }
}

/// Print help for the interactive chat commands
pub fn print_help() {
    println!("Commands:");
    println!("  /new             Start a new chat (clears the conversation)");
    println!("  /upload <path>   Upload a PDF document for analysis");
    println!("  /status          Show session status");
    println!("  /help            Show this help");
    println!("  /exit            Leave the chat");
    println!();
    println!("Anything else is sent to the compliance assistant as a query.");
}
